//! Flat views over snapshot trees, keyed by absolute path.

mod indexer;
mod root_hashes;

pub use indexer::{SnapshotIndex, index, root_index};
pub use root_hashes::{RootHashes, root_hashes};
