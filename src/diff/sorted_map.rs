use std::cmp::Ordering;
use std::ops::ControlFlow;

/// Receives the classification of every key seen by [`diff`].
///
/// Returning [`ControlFlow::Break`] from any callback ends the diff right away.
pub trait SortedMapDiffListener<K, P, C> {
    fn removed(&mut self, key: K, previous: P) -> ControlFlow<()>;

    fn added(&mut self, key: K, current: C) -> ControlFlow<()>;

    /// Called for keys present on both sides, whether or not the values differ.
    fn updated(&mut self, key: K, previous: P, current: C) -> ControlFlow<()>;
}

/// Walks two mappings sorted ascending by key in lockstep.
///
/// Keys are reported in ascending order of the merged key set. Only presence is
/// compared; values are handed to the listener untouched.
pub fn diff<K, P, C, L>(
    previous: impl IntoIterator<Item = (K, P)>,
    current: impl IntoIterator<Item = (K, C)>,
    listener: &mut L,
) -> ControlFlow<()>
where
    K: Ord,
    L: SortedMapDiffListener<K, P, C> + ?Sized,
{
    let mut previous = previous.into_iter().peekable();
    let mut current = current.into_iter().peekable();

    loop {
        let ordering = match (previous.peek(), current.peek()) {
            (None, None) => return ControlFlow::Continue(()),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some((previous_key, _)), Some((current_key, _))) => previous_key.cmp(current_key),
        };

        match ordering {
            Ordering::Less => {
                if let Some((key, value)) = previous.next() {
                    listener.removed(key, value)?;
                }
            }
            Ordering::Greater => {
                if let Some((key, value)) = current.next() {
                    listener.added(key, value)?;
                }
            }
            Ordering::Equal => {
                if let (Some((key, previous_value)), Some((_, current_value))) =
                    (previous.next(), current.next())
                {
                    listener.updated(key, previous_value, current_value)?;
                }
            }
        }
    }
}
