use std::sync::Arc;

use hashlink::LinkedHashMap;
use tracing::trace;

use crate::snapshot::{FileSystemSnapshot, LocationSnapshot, SnapshotVisitResult};

/// Snapshots keyed by absolute path, in visitation order.
pub type SnapshotIndex = LinkedHashMap<String, Arc<LocationSnapshot>>;

/// Indexes every entry of the tree.
///
/// Missing roots are left out so that a present-vs-absent root shows up as
/// added or removed rather than as an entry on both sides.
pub fn index(snapshot: &FileSystemSnapshot) -> SnapshotIndex {
    let mut index = SnapshotIndex::new();
    snapshot.accept(|entry, relative_path| {
        if relative_path.is_empty() && entry.is_missing() {
            trace!("Not indexing missing root {}", entry.absolute_path());
        } else {
            index.insert(entry.absolute_path().to_string(), Arc::clone(entry));
        }
        SnapshotVisitResult::Continue
    });
    index
}

/// Indexes only the roots of the tree.
pub fn root_index(snapshot: &FileSystemSnapshot) -> SnapshotIndex {
    let mut index = SnapshotIndex::new();
    snapshot.accept(|entry, _| {
        index.insert(entry.absolute_path().to_string(), Arc::clone(entry));
        SnapshotVisitResult::SkipSubtree
    });
    index
}
