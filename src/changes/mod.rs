//! Change detection between the output snapshots of two executions.

mod change;
mod output_file_changes;
mod visitor;

use std::collections::BTreeMap;

use crate::snapshot::FileSystemSnapshot;

pub use change::{Change, ChangeKind, ChangeTarget};
pub use output_file_changes::{OutputFileChanges, RootShortcut, detect_changes};
pub use visitor::{ChangeVisitor, CollectingChangeVisitor, LimitingChangeVisitor};

/// Output snapshots of one execution, keyed and ordered by property name.
pub type SnapshotSet = BTreeMap<String, FileSystemSnapshot>;
