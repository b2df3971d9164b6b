//! Path utilities shared by snapshot lookups.
//!
//! Paths inside a snapshot tree are plain `/`-separated strings. Whether two
//! segments that differ only in letter case name the same entry is decided by
//! a [`CaseSensitivity`] policy that the caller passes in explicitly.

mod case_sensitivity;
mod relative_path;

pub use case_sensitivity::CaseSensitivity;
pub use relative_path::{RelativePath, SEPARATOR, first_segment};
