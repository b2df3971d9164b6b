#![allow(clippy::enum_variant_names)]

//! Change detection core for incremental builds.
//!
//! Snapshots of the filesystem taken after two executions are compared
//! property by property. Cheap identity and hash checks run first; only when
//! they cannot prove a property unchanged are both sides turned into
//! location-independent fingerprints and compared entry by entry.

pub mod changes;
pub mod diff;
pub mod fingerprint;
pub mod index;
pub mod path;
pub mod snapshot;

#[cfg(test)]
mod test_support;

pub use changes::{Change, ChangeKind, ChangeVisitor, OutputFileChanges, SnapshotSet, detect_changes};
pub use path::CaseSensitivity;
pub use snapshot::{FileSystemSnapshot, FileType, HashCode, LocationSnapshot};
