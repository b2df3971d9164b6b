//! Location-independent fingerprints of snapshots and their comparison.

mod compare;
#[allow(clippy::module_inception)]
mod fingerprint;
mod interner;
mod strategy;

pub use compare::NormalizedPathFingerprintCompareStrategy;
pub use fingerprint::{FileCollectionFingerprint, LocationFingerprint};
pub use interner::{HashSetInterner, NoopInterner, StringInterner};
pub use strategy::{DirectorySensitivity, RelativePathFingerprintingStrategy};
