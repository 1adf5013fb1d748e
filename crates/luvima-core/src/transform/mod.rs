//! Geometric transforms: rotation, flips and cropping.
//!
//! The editor never mutates the source image for these. Rotation and flips
//! are state drawn at render time, and committed crops are applied to the
//! rendered surface.
//!
//! # Render Order
//!
//! 1. Fit the source to the surface size
//! 2. Draw under rotation and flips
//! 3. Filters
//! 4. Committed crops
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise
//! - Crop coordinates are surface pixels, origin top-left

mod crop;
mod draw;
mod state;
mod tool;

pub use crop::{apply_crop, apply_crops, CropRect, PixelRect, Point};
pub use draw::{draw_transformed, fit_surface, InterpolationFilter};
pub use state::TransformState;
pub use tool::{CropRelease, CropTool};
