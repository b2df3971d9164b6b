use std::ops::ControlFlow;
use std::sync::Arc;

use crate::changes::{Change, ChangeKind, ChangeVisitor};
use crate::diff::{SortedMapDiffListener, diff};
use crate::fingerprint::{FileCollectionFingerprint, LocationFingerprint};

/// Compares two fingerprints entry by entry, keyed on normalized path.
pub struct NormalizedPathFingerprintCompareStrategy;

impl NormalizedPathFingerprintCompareStrategy {
    /// Reports every difference between `previous` and `current` to `visitor`,
    /// in ascending normalized path order, each tagged with `context`.
    ///
    /// Within a normalized path, entries with equal hashes pair off as
    /// unchanged; the rest are reported as modified pairs, then removals, then
    /// additions.
    pub fn visit_changes_since<V: ChangeVisitor + ?Sized>(
        previous: &FileCollectionFingerprint,
        current: &FileCollectionFingerprint,
        context: &Arc<str>,
        visitor: &mut V,
    ) -> ControlFlow<()> {
        let mut listener = FingerprintDiffListener { context, visitor };
        diff(
            previous.fingerprints_by_path(),
            current.fingerprints_by_path(),
            &mut listener,
        )
    }
}

struct FingerprintDiffListener<'c, V: ?Sized> {
    context: &'c Arc<str>,
    visitor: &'c mut V,
}

impl<V: ChangeVisitor + ?Sized> FingerprintDiffListener<'_, V> {
    fn report(&mut self, kind: ChangeKind, fingerprint: &LocationFingerprint) -> ControlFlow<()> {
        self.visitor
            .visit_change(&Change::file(kind, fingerprint, self.context))
    }
}

type Entries<'a> = &'a Vec<LocationFingerprint>;

impl<'a, V: ChangeVisitor + ?Sized> SortedMapDiffListener<&'a Arc<str>, Entries<'a>, Entries<'a>>
    for FingerprintDiffListener<'_, V>
{
    fn removed(&mut self, _: &'a Arc<str>, previous: Entries<'a>) -> ControlFlow<()> {
        previous
            .iter()
            .try_for_each(|fingerprint| self.report(ChangeKind::Removed, fingerprint))
    }

    fn added(&mut self, _: &'a Arc<str>, current: Entries<'a>) -> ControlFlow<()> {
        current
            .iter()
            .try_for_each(|fingerprint| self.report(ChangeKind::Added, fingerprint))
    }

    fn updated(
        &mut self,
        _: &'a Arc<str>,
        previous: Entries<'a>,
        current: Entries<'a>,
    ) -> ControlFlow<()> {
        let mut unmatched_current = current.iter().map(Some).collect::<Vec<_>>();
        let mut unmatched_previous = Vec::new();
        for fingerprint in previous {
            let matching = unmatched_current.iter_mut().find(|candidate| {
                candidate.is_some_and(|candidate| {
                    candidate.normalized_content_hash() == fingerprint.normalized_content_hash()
                })
            });
            match matching {
                Some(slot) => *slot = None,
                None => unmatched_previous.push(fingerprint),
            }
        }

        let mut unmatched_current = unmatched_current.into_iter().flatten();
        let mut unmatched_previous = unmatched_previous.into_iter();
        loop {
            match (unmatched_previous.next(), unmatched_current.next()) {
                (Some(_), Some(current)) => self.report(ChangeKind::Modified, current)?,
                (Some(previous), None) => {
                    self.report(ChangeKind::Removed, previous)?;
                    return unmatched_previous
                        .try_for_each(|previous| self.report(ChangeKind::Removed, previous));
                }
                (None, Some(current)) => {
                    self.report(ChangeKind::Added, current)?;
                    return unmatched_current
                        .try_for_each(|current| self.report(ChangeKind::Added, current));
                }
                (None, None) => return ControlFlow::Continue(()),
            }
        }
    }
}
