use std::ops::ControlFlow;
use std::sync::Arc;

use derive_more::Display;
use tracing::{debug, trace};

use crate::changes::{Change, ChangeKind, ChangeVisitor, SnapshotSet};
use crate::diff::{SortedMapDiffListener, diff};
use crate::fingerprint::{
    DirectorySensitivity, NoopInterner, NormalizedPathFingerprintCompareStrategy,
    RelativePathFingerprintingStrategy,
};
use crate::snapshot::{FileSystemSnapshot, FileType};

/// Cheap check that proves a property unchanged without fingerprinting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RootShortcut {
    /// Both sides are the very same snapshot value.
    #[display("same snapshot instance")]
    SameInstance,
    /// Both sides are single roots with the same hash. Regular files must also
    /// keep their name, so a renamed root file is still reported.
    #[display("equal root hash")]
    EqualRootHash,
}

impl RootShortcut {
    pub fn find(previous: &FileSystemSnapshot, current: &FileSystemSnapshot) -> Option<Self> {
        if previous.same_instance(current) {
            return Some(RootShortcut::SameInstance);
        }
        let (Some(previous), Some(current)) = (previous.as_location(), current.as_location()) else {
            return None;
        };
        let name_preserved =
            previous.file_type() != FileType::RegularFile || previous.name() == current.name();
        (previous.hash() == current.hash() && name_preserved).then_some(RootShortcut::EqualRootHash)
    }
}

/// Detects changes between the output snapshots of two executions.
///
/// Properties are visited in name order. A property present on only one side
/// is reported once as a whole; a property present on both sides is compared
/// through [`RootShortcut`] first and fingerprinted only when no shortcut
/// applies.
#[derive(Debug, Clone, Copy)]
pub struct OutputFileChanges<'a> {
    previous: &'a SnapshotSet,
    current: &'a SnapshotSet,
}

impl<'a> OutputFileChanges<'a> {
    pub fn new(previous: &'a SnapshotSet, current: &'a SnapshotSet) -> Self {
        Self { previous, current }
    }

    /// Feeds every change to `visitor`.
    ///
    /// Returns `false` when the visitor stopped the detection early.
    pub fn accept<V: ChangeVisitor + ?Sized>(&self, visitor: &mut V) -> bool {
        debug!(
            "Detecting output changes ({} previous properties, {} current properties)",
            self.previous.len(),
            self.current.len()
        );
        let mut listener = PropertyDiffListener { visitor };
        let completed = diff(self.previous, self.current, &mut listener).is_continue();
        if !completed {
            trace!("Change visitor stopped output change detection");
        }
        completed
    }
}

/// Shorthand for `OutputFileChanges::new(previous, current).accept(visitor)`.
pub fn detect_changes<V: ChangeVisitor + ?Sized>(
    previous: &SnapshotSet,
    current: &SnapshotSet,
    visitor: &mut V,
) -> bool {
    OutputFileChanges::new(previous, current).accept(visitor)
}

struct PropertyDiffListener<'v, V: ?Sized> {
    visitor: &'v mut V,
}

impl<'a, V: ChangeVisitor + ?Sized>
    SortedMapDiffListener<&'a String, &'a FileSystemSnapshot, &'a FileSystemSnapshot>
    for PropertyDiffListener<'_, V>
{
    fn removed(&mut self, property: &'a String, _: &'a FileSystemSnapshot) -> ControlFlow<()> {
        trace!("Output property '{property}' has been removed");
        self.visitor
            .visit_change(&Change::property(ChangeKind::Removed, property))
    }

    fn added(&mut self, property: &'a String, _: &'a FileSystemSnapshot) -> ControlFlow<()> {
        trace!("Output property '{property}' has been added");
        self.visitor
            .visit_change(&Change::property(ChangeKind::Added, property))
    }

    fn updated(
        &mut self,
        property: &'a String,
        previous: &'a FileSystemSnapshot,
        current: &'a FileSystemSnapshot,
    ) -> ControlFlow<()> {
        if let Some(shortcut) = RootShortcut::find(previous, current) {
            trace!("Output property '{property}' unchanged: {shortcut}");
            return ControlFlow::Continue(());
        }

        debug!("Fingerprinting output property '{property}'");
        let mut strategy =
            RelativePathFingerprintingStrategy::new(NoopInterner, DirectorySensitivity::Default);
        let previous_fingerprint = strategy.collect_fingerprints(previous);
        let current_fingerprint = strategy.collect_fingerprints(current);
        NormalizedPathFingerprintCompareStrategy::visit_changes_since(
            &previous_fingerprint,
            &current_fingerprint,
            &Arc::from(property.as_str()),
            self.visitor,
        )
    }
}
