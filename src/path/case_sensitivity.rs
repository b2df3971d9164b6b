use std::cmp::Ordering;

use derive_more::Display;

use super::SEPARATOR;

/// Policy deciding whether path segments that only differ in case are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum CaseSensitivity {
    #[default]
    #[display("case-sensitive")]
    CaseSensitive,
    #[display("case-insensitive")]
    CaseInsensitive,
}

impl CaseSensitivity {
    /// The policy of the default filesystem on the platform we are compiled for.
    pub fn for_current_platform() -> Self {
        if cfg!(any(target_os = "macos", target_os = "windows")) {
            CaseSensitivity::CaseInsensitive
        } else {
            CaseSensitivity::CaseSensitive
        }
    }

    pub fn is_case_sensitive(self) -> bool {
        self == CaseSensitivity::CaseSensitive
    }

    /// Compares two single path segments.
    pub fn compare_segments(self, left: &str, right: &str) -> Ordering {
        match self {
            CaseSensitivity::CaseSensitive => left.cmp(right),
            CaseSensitivity::CaseInsensitive => fold_case(left).cmp(fold_case(right)),
        }
    }

    pub fn segments_equal(self, left: &str, right: &str) -> bool {
        self.compare_segments(left, right) == Ordering::Equal
    }

    /// Compares two relative paths segment by segment.
    ///
    /// A path sorts before every path it is a strict prefix of, so `a` < `a/b` < `a-b`.
    pub fn compare_paths(self, left: &str, right: &str) -> Ordering {
        let mut left_segments = left.split(SEPARATOR).filter(|s| !s.is_empty());
        let mut right_segments = right.split(SEPARATOR).filter(|s| !s.is_empty());
        loop {
            match (left_segments.next(), right_segments.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(l), Some(r)) => match self.compare_segments(l, r) {
                    Ordering::Equal => continue,
                    ordering => return ordering,
                },
            }
        }
    }
}

fn fold_case(segment: &str) -> impl Iterator<Item = char> {
    segment.chars().flat_map(char::to_lowercase)
}
