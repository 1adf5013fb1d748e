//! Rounded-corner masking.
//!
//! The `border-radius` filter is not part of the color pipeline. It runs
//! last, after crops, and only ever clears alpha in the four corners.

mod corner;

pub use corner::{apply_corner_mask, corner_distance, Corner};
