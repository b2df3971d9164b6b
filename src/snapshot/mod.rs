//! Immutable snapshots of filesystem state.
//!
//! A snapshot tree is built once by whoever walks the filesystem and is never
//! modified afterwards. Nodes are shared through [`std::sync::Arc`], so the
//! same tree can take part in any number of comparisons, on any thread.

mod child_map;
mod file_system;
mod hash;
mod location;

pub use child_map::{ChildLookup, ChildMap, ChildMapError};
pub use file_system::{FileSystemSnapshot, SnapshotVisitResult};
pub use hash::{HashCode, MerkleDirectoryHasher};
pub use location::{FileType, LocationSnapshot, NodeView, SnapshotError, SnapshotKind};
