//! Runtime configuration.
//!
//! Both structs deserialize from partial input: any field left out takes
//! its default, so `{}` is a complete configuration.

use serde::{Deserialize, Serialize};

use crate::transform::InterpolationFilter;

/// Settings for the image editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Largest surface width; bigger images are scaled down to fit.
    pub max_surface_width: u32,
    /// Largest surface height.
    pub max_surface_height: u32,
    /// Smallest crop width and height accepted, in surface pixels.
    pub min_crop_extent: f64,
    /// Number of undo steps kept.
    pub history_limit: usize,
    /// Sampling used when drawing the source onto the surface.
    pub interpolation: InterpolationFilter,
    /// URL the background-removal request is POSTed to.
    pub remove_bg_endpoint: String,
    /// Saved files are named `<export_prefix>-<timestamp>.png`.
    pub export_prefix: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_surface_width: 800,
            max_surface_height: 600,
            min_crop_extent: 10.0,
            history_limit: 50,
            interpolation: InterpolationFilter::Bilinear,
            remove_bg_endpoint: "/remove-bg".to_string(),
            export_prefix: "luvima-edited".to_string(),
        }
    }
}

/// Settings for the signup form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupConfig {
    pub min_password_length: usize,
    /// Lowest strength score a password may have on submit.
    pub min_password_strength: u8,
    /// Delay of the simulated submitter.
    pub submit_delay_ms: u32,
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            min_password_length: 8,
            min_password_strength: 3,
            submit_delay_ms: 2500,
        }
    }
}
