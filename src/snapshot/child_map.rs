use std::cmp::Ordering;

use snafu::Snafu;

use crate::path::{CaseSensitivity, RelativePath, first_segment};

/// Children of a directory node, sorted by the order of a [`CaseSensitivity`] policy.
///
/// Keys are relative paths, normally a single segment. No two keys share a
/// first segment under the policy, so a lookup can only ever hit one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildMap<T> {
    entries: Vec<(String, T)>,
    case_sensitivity: CaseSensitivity,
}

/// Where a target path sits relative to the entries of a [`ChildMap`].
#[derive(Debug, PartialEq, Eq)]
pub enum ChildLookup<'m, 'p, T> {
    /// The target lies strictly below `child`; `path_in_child` is the rest of it.
    DescendantOfChild {
        path_in_child: RelativePath<'p>,
        child: &'m T,
    },
    /// The target is a strict ancestor of the child's key.
    AncestorOfChild {
        path_to_child: RelativePath<'m>,
        child: &'m T,
    },
    ExactMatch {
        child: &'m T,
    },
    Unrelated,
}

impl<T> ChildMap<T> {
    pub fn empty(case_sensitivity: CaseSensitivity) -> Self {
        Self {
            entries: Vec::new(),
            case_sensitivity,
        }
    }

    pub fn new(
        children: impl IntoIterator<Item = (String, T)>,
        case_sensitivity: CaseSensitivity,
    ) -> Result<Self, ChildMapError> {
        let mut entries = children
            .into_iter()
            .map(|(path, child)| (RelativePath::new(&path).as_str().to_string(), child))
            .collect::<Vec<_>>();

        if entries.iter().any(|(path, _)| path.is_empty()) {
            return Err(ChildMapError::EmptyChildPathError);
        }

        entries.sort_by(|(left, _), (right, _)| case_sensitivity.compare_paths(left, right));

        if let Some(pair) = entries.windows(2).find(|pair| {
            case_sensitivity.compare_segments(first_segment(&pair[0].0), first_segment(&pair[1].0))
                == Ordering::Equal
        }) {
            return Err(ChildMapError::DuplicateChildError {
                first: pair[0].0.clone(),
                second: pair[1].0.clone(),
                case_sensitivity,
            });
        }

        Ok(Self {
            entries,
            case_sensitivity,
        })
    }

    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.case_sensitivity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(path, child)| (path.as_str(), child))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, child)| child)
    }

    /// The child stored exactly under `path`, if any.
    pub fn get(&self, path: &str) -> Option<&T> {
        match self.with_node(RelativePath::new(path)) {
            ChildLookup::ExactMatch { child } => Some(child),
            _ => None,
        }
    }

    /// Classifies `target` against the entries of this map.
    ///
    /// The empty path is unrelated to every entry.
    pub fn with_node<'m, 'p>(&'m self, target: RelativePath<'p>) -> ChildLookup<'m, 'p, T> {
        if target.is_empty() {
            return ChildLookup::Unrelated;
        }
        let case_sensitivity = self.case_sensitivity;
        let index = match self
            .entries
            .binary_search_by(|(key, _)| target.compare_to_first_segment(key, case_sensitivity))
        {
            Ok(index) => index,
            Err(_) => return ChildLookup::Unrelated,
        };

        let (key, child) = &self.entries[index];
        let key = RelativePath::new(key);
        if let Some(offset) = target.match_prefix(key, case_sensitivity) {
            if offset == target.len() {
                ChildLookup::ExactMatch { child }
            } else {
                ChildLookup::DescendantOfChild {
                    path_in_child: target.suffix_starting_from(offset),
                    child,
                }
            }
        } else if let Some(path_to_child) = target.path_to_child(key.as_str(), case_sensitivity) {
            ChildLookup::AncestorOfChild {
                path_to_child,
                child,
            }
        } else {
            ChildLookup::Unrelated
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ChildMapError {
    #[snafu(display("Child paths must not be empty"))]
    EmptyChildPathError,
    #[snafu(display(
        "Children '{}' and '{}' collide under a {} comparison",
        first,
        second,
        case_sensitivity
    ))]
    DuplicateChildError {
        first: String,
        second: String,
        case_sensitivity: CaseSensitivity,
    },
}
