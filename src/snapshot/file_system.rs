use std::sync::Arc;

use crate::snapshot::LocationSnapshot;

/// What a visitor wants to happen after it has seen an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotVisitResult {
    Continue,
    /// Do not descend into the children of the entry just visited.
    SkipSubtree,
    /// Stop the whole walk.
    Terminate,
}

/// The snapshot of everything recorded for one property: nothing, one root,
/// or several roots.
#[derive(Debug, Clone, Default)]
pub enum FileSystemSnapshot {
    #[default]
    Empty,
    Location(Arc<LocationSnapshot>),
    Composite(Arc<[Arc<LocationSnapshot>]>),
}

impl FileSystemSnapshot {
    pub fn from_roots(mut roots: Vec<Arc<LocationSnapshot>>) -> Self {
        match roots.len() {
            0 => FileSystemSnapshot::Empty,
            1 => match roots.pop() {
                Some(root) => FileSystemSnapshot::Location(root),
                None => FileSystemSnapshot::Empty,
            },
            _ => FileSystemSnapshot::Composite(roots.into()),
        }
    }

    /// Whether both values refer to the very same tree instance.
    pub fn same_instance(&self, other: &FileSystemSnapshot) -> bool {
        match (self, other) {
            (FileSystemSnapshot::Empty, FileSystemSnapshot::Empty) => true,
            (FileSystemSnapshot::Location(left), FileSystemSnapshot::Location(right)) => {
                Arc::ptr_eq(left, right)
            }
            (FileSystemSnapshot::Composite(left), FileSystemSnapshot::Composite(right)) => {
                Arc::ptr_eq(left, right)
            }
            _ => false,
        }
    }

    /// The single root, when this is not a composite or empty snapshot.
    pub fn as_location(&self) -> Option<&Arc<LocationSnapshot>> {
        match self {
            FileSystemSnapshot::Location(root) => Some(root),
            FileSystemSnapshot::Empty | FileSystemSnapshot::Composite(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FileSystemSnapshot::Empty)
    }

    pub fn root_snapshots(&self) -> impl Iterator<Item = &Arc<LocationSnapshot>> {
        let roots: &[Arc<LocationSnapshot>] = match self {
            FileSystemSnapshot::Empty => &[],
            FileSystemSnapshot::Location(root) => std::slice::from_ref(root),
            FileSystemSnapshot::Composite(roots) => roots,
        };
        roots.iter()
    }

    /// Walks all entries pre-order.
    ///
    /// The visitor receives each entry together with the path segments leading
    /// to it from its root; roots get an empty slice. Returns
    /// [`SnapshotVisitResult::Terminate`] if the visitor stopped the walk.
    pub fn accept<'t, V>(&'t self, mut visitor: V) -> SnapshotVisitResult
    where
        V: FnMut(&'t Arc<LocationSnapshot>, &[&'t str]) -> SnapshotVisitResult,
    {
        let mut segments = Vec::new();
        for root in self.root_snapshots() {
            if walk(root, &mut segments, &mut visitor) == SnapshotVisitResult::Terminate {
                return SnapshotVisitResult::Terminate;
            }
        }
        SnapshotVisitResult::Continue
    }
}

impl From<Arc<LocationSnapshot>> for FileSystemSnapshot {
    fn from(root: Arc<LocationSnapshot>) -> Self {
        FileSystemSnapshot::Location(root)
    }
}

impl From<LocationSnapshot> for FileSystemSnapshot {
    fn from(root: LocationSnapshot) -> Self {
        FileSystemSnapshot::Location(Arc::new(root))
    }
}

fn walk<'t, V>(
    snapshot: &'t Arc<LocationSnapshot>,
    segments: &mut Vec<&'t str>,
    visitor: &mut V,
) -> SnapshotVisitResult
where
    V: FnMut(&'t Arc<LocationSnapshot>, &[&'t str]) -> SnapshotVisitResult,
{
    match visitor(snapshot, segments.as_slice()) {
        SnapshotVisitResult::Terminate => return SnapshotVisitResult::Terminate,
        SnapshotVisitResult::SkipSubtree => return SnapshotVisitResult::Continue,
        SnapshotVisitResult::Continue => {}
    }
    if let Some(children) = snapshot.children() {
        for (path, child) in children.iter() {
            segments.push(path);
            let result = walk(child, segments, visitor);
            segments.pop();
            if result == SnapshotVisitResult::Terminate {
                return SnapshotVisitResult::Terminate;
            }
        }
    }
    SnapshotVisitResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dir, file, missing};

    fn snapshot() -> FileSystemSnapshot {
        FileSystemSnapshot::from_roots(vec![
            dir(
                "/work/out",
                vec![
                    file("/work/out/a.txt", 1),
                    dir("/work/out/sub", vec![file("/work/out/sub/b.txt", 2)]),
                ],
            ),
            missing("/work/gone"),
        ])
    }

    fn visited(snapshot: &FileSystemSnapshot, skip: Option<&str>) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        snapshot.accept(|entry, relative_path| {
            entries.push((entry.absolute_path().to_string(), relative_path.join("/")));
            if Some(entry.name()) == skip {
                SnapshotVisitResult::SkipSubtree
            } else {
                SnapshotVisitResult::Continue
            }
        });
        entries
    }

    #[test]
    fn walks_pre_order_with_relative_paths() {
        assert_eq!(
            visited(&snapshot(), None),
            vec![
                ("/work/out".to_string(), "".to_string()),
                ("/work/out/a.txt".to_string(), "a.txt".to_string()),
                ("/work/out/sub".to_string(), "sub".to_string()),
                ("/work/out/sub/b.txt".to_string(), "sub/b.txt".to_string()),
                ("/work/gone".to_string(), "".to_string()),
            ]
        );
    }

    #[test]
    fn skip_subtree_does_not_descend() {
        let entries = visited(&snapshot(), Some("sub"));
        assert!(entries.iter().any(|(path, _)| path == "/work/out/sub"));
        assert!(!entries.iter().any(|(path, _)| path == "/work/out/sub/b.txt"));
        assert!(entries.iter().any(|(path, _)| path == "/work/gone"));
    }

    #[test]
    fn terminate_stops_the_walk() {
        let mut seen = 0;
        let result = snapshot().accept(|_, _| {
            seen += 1;
            SnapshotVisitResult::Terminate
        });
        assert_eq!(result, SnapshotVisitResult::Terminate);
        assert_eq!(seen, 1);
    }

    #[test]
    fn from_roots_picks_the_narrowest_variant() {
        assert!(FileSystemSnapshot::from_roots(vec![]).is_empty());
        assert!(
            FileSystemSnapshot::from_roots(vec![file("/a", 1)])
                .as_location()
                .is_some()
        );
        assert_eq!(snapshot().root_snapshots().count(), 2);
    }

    #[test]
    fn same_instance_is_reference_identity() {
        let root = file("/a", 1);
        let first = FileSystemSnapshot::from(Arc::clone(&root));
        let second = FileSystemSnapshot::from(root);
        let copy = FileSystemSnapshot::from(file("/a", 1));
        assert!(first.same_instance(&second));
        assert!(!first.same_instance(&copy));
        assert!(FileSystemSnapshot::Empty.same_instance(&FileSystemSnapshot::Empty));

        let composite = snapshot();
        assert!(composite.same_instance(&composite.clone()));
        assert!(!composite.same_instance(&snapshot()));
    }
}
