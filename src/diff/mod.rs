//! Lockstep comparison of key-sorted mappings.

mod sorted_map;

pub use sorted_map::{SortedMapDiffListener, diff};
