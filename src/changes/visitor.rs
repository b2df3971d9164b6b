use std::ops::ControlFlow;

use crate::changes::Change;

/// Consumer of change events.
///
/// Returning [`ControlFlow::Break`] stops the detection that produced the event.
pub trait ChangeVisitor {
    fn visit_change(&mut self, change: &Change) -> ControlFlow<()>;
}

impl<F> ChangeVisitor for F
where
    F: FnMut(&Change) -> ControlFlow<()>,
{
    fn visit_change(&mut self, change: &Change) -> ControlFlow<()> {
        self(change)
    }
}

/// Keeps every change it is handed.
#[derive(Debug, Clone, Default)]
pub struct CollectingChangeVisitor {
    changes: Vec<Change>,
}

impl CollectingChangeVisitor {
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn into_changes(self) -> Vec<Change> {
        self.changes
    }
}

impl ChangeVisitor for CollectingChangeVisitor {
    fn visit_change(&mut self, change: &Change) -> ControlFlow<()> {
        self.changes.push(change.clone());
        ControlFlow::Continue(())
    }
}

/// Forwards at most `limit` changes, then asks the producer to stop.
#[derive(Debug)]
pub struct LimitingChangeVisitor<V> {
    delegate: V,
    limit: usize,
    visited: usize,
}

impl<V: ChangeVisitor> LimitingChangeVisitor<V> {
    pub fn new(delegate: V, limit: usize) -> Self {
        Self {
            delegate,
            limit,
            visited: 0,
        }
    }

    pub fn visited(&self) -> usize {
        self.visited
    }

    pub fn into_inner(self) -> V {
        self.delegate
    }
}

impl<V: ChangeVisitor> ChangeVisitor for LimitingChangeVisitor<V> {
    fn visit_change(&mut self, change: &Change) -> ControlFlow<()> {
        if self.visited >= self.limit {
            return ControlFlow::Break(());
        }
        self.visited += 1;
        self.delegate.visit_change(change)?;
        if self.visited >= self.limit {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changes::ChangeKind;
    use rstest::*;

    fn change(name: &str) -> Change {
        Change::property(ChangeKind::Added, name)
    }

    #[test]
    fn closures_are_visitors() {
        let mut seen = Vec::new();
        let mut visitor = |change: &Change| {
            seen.push(change.context().to_string());
            ControlFlow::Continue(())
        };
        assert!(visitor.visit_change(&change("a")).is_continue());
        assert!(visitor.visit_change(&change("b")).is_continue());
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn collecting_visitor_keeps_order() {
        let mut visitor = CollectingChangeVisitor::default();
        let _ = visitor.visit_change(&change("b"));
        let _ = visitor.visit_change(&change("a"));
        assert_eq!(visitor.into_changes(), vec![change("b"), change("a")]);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(3, 3)]
    fn limiting_visitor_stops_at_limit(#[case] limit: usize, #[case] forwarded: usize) {
        let mut visitor = LimitingChangeVisitor::new(CollectingChangeVisitor::default(), limit);
        let mut results = Vec::new();
        for name in ["a", "b", "c", "d", "e"] {
            let result = visitor.visit_change(&change(name));
            results.push(result);
            if result.is_break() {
                break;
            }
        }
        assert!(results.last().is_some_and(|result| result.is_break()));
        assert_eq!(visitor.visited(), forwarded);
        assert_eq!(visitor.into_inner().changes().len(), forwarded);
    }
}
