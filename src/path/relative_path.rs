use std::cmp::Ordering;

use derive_more::Display;

use super::CaseSensitivity;

pub const SEPARATOR: char = '/';

/// Returns the first segment of a `/`-separated path.
pub fn first_segment(path: &str) -> &str {
    let path = path.trim_start_matches(SEPARATOR);
    match path.find(SEPARATOR) {
        Some(index) => &path[..index],
        None => path,
    }
}

/// A borrowed path relative to some snapshot node.
///
/// Leading and trailing separators are stripped on construction, so the empty
/// path denotes the node itself. Segments are expected to be non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[display("{path}")]
pub struct RelativePath<'a> {
    path: &'a str,
}

impl<'a> RelativePath<'a> {
    pub fn new(path: &'a str) -> Self {
        Self {
            path: path.trim_matches(SEPARATOR),
        }
    }

    /// The path of `absolute_path` below `root`, if it lies inside it.
    pub fn from_absolute_path(
        root: &str,
        absolute_path: &'a str,
        case_sensitivity: CaseSensitivity,
    ) -> Option<Self> {
        let root = RelativePath::new(root);
        let absolute = RelativePath::new(absolute_path);
        absolute
            .match_prefix(root, case_sensitivity)
            .map(|offset| absolute.suffix_starting_from(offset))
    }

    pub fn as_str(&self) -> &'a str {
        self.path
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.path.split(SEPARATOR).filter(|s| !s.is_empty())
    }

    pub fn first_segment(&self) -> &'a str {
        first_segment(self.path)
    }

    /// The remainder of this path after skipping `offset` bytes.
    pub fn suffix_starting_from(&self, offset: usize) -> RelativePath<'a> {
        RelativePath::new(self.path.get(offset..).unwrap_or_default())
    }

    /// Matches `prefix` against the leading segments of this path.
    ///
    /// Returns the byte offset in `self` right after the matched segments, or
    /// `None` when `prefix` is not a segment-wise prefix of this path.
    pub fn match_prefix(
        &self,
        prefix: RelativePath<'_>,
        case_sensitivity: CaseSensitivity,
    ) -> Option<usize> {
        let mut own_segments = self.segments();
        let mut offset: Option<usize> = None;
        for expected in prefix.segments() {
            let actual = own_segments.next()?;
            if !case_sensitivity.segments_equal(actual, expected) {
                return None;
            }
            offset = Some(match offset {
                None => actual.len(),
                Some(previous) => previous + 1 + actual.len(),
            });
        }
        Some(offset.unwrap_or(0))
    }

    pub fn starts_with(&self, prefix: RelativePath<'_>, case_sensitivity: CaseSensitivity) -> bool {
        self.match_prefix(prefix, case_sensitivity).is_some()
    }

    /// Byte length of the leading segments this path shares with `other`.
    pub fn length_of_common_prefix(
        &self,
        other: RelativePath<'_>,
        case_sensitivity: CaseSensitivity,
    ) -> usize {
        let mut length = 0;
        for (index, (own, theirs)) in self.segments().zip(other.segments()).enumerate() {
            if !case_sensitivity.segments_equal(own, theirs) {
                break;
            }
            length += own.len() + usize::from(index > 0);
        }
        length
    }

    /// Orders the first segment of `key` relative to the first segment of this path.
    pub fn compare_to_first_segment(&self, key: &str, case_sensitivity: CaseSensitivity) -> Ordering {
        case_sensitivity.compare_segments(first_segment(key), self.first_segment())
    }

    /// For a `child_path` lying strictly below this path, the part of it below this path.
    pub fn path_to_child<'c>(
        &self,
        child_path: &'c str,
        case_sensitivity: CaseSensitivity,
    ) -> Option<RelativePath<'c>> {
        let child = RelativePath::new(child_path);
        let offset = child.match_prefix(*self, case_sensitivity)?;
        let remainder = child.suffix_starting_from(offset);
        (!remainder.is_empty()).then_some(remainder)
    }
}
