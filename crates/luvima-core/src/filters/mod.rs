//! Filter parameters for the editor.
//!
//! A [`FilterVector`] holds one numeric value per [`FilterKind`]. Every kind
//! has an independent [`FilterRange`]; values outside the range are rejected
//! by [`FilterVector::set`] and clamped by [`FilterVector::set_clamped`].
//!
//! ## Rendering Order
//! 1. Brightness
//! 2. Saturate
//! 3. Invert
//! 4. Grayscale
//! 5. Blur
//! 6. Contrast
//! 7. Opacity
//! 8. Sepia
//!
//! `sharpen` is tracked but not rendered. `border-radius` is not a color
//! filter; it drives the corner mask after rendering.

mod apply;

pub use apply::{apply_filters, gaussian_blur_rgba};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when reading or writing filter values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// The filter name is not one of the known kinds.
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    /// The value lies outside the filter's range.
    #[error("{filter} value {value} is outside {min}..={max}")]
    OutOfRange {
        filter: FilterKind,
        value: f32,
        min: f32,
        max: f32,
    },

    /// The value is NaN or infinite.
    #[error("{filter} value must be a finite number")]
    NotFinite { filter: FilterKind },
}

/// The named image adjustments the editor exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    Brightness,
    Saturation,
    Inversion,
    Grayscale,
    Blur,
    Contrast,
    Opacity,
    Sepia,
    Sharpen,
    BorderRadius,
}

impl FilterKind {
    /// Every kind, in the order the controls are laid out.
    pub const ALL: [FilterKind; 10] = [
        FilterKind::Brightness,
        FilterKind::Saturation,
        FilterKind::Inversion,
        FilterKind::Grayscale,
        FilterKind::Blur,
        FilterKind::Contrast,
        FilterKind::Opacity,
        FilterKind::Sepia,
        FilterKind::Sharpen,
        FilterKind::BorderRadius,
    ];

    /// The control name, e.g. `"border-radius"`.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Brightness => "brightness",
            FilterKind::Saturation => "saturation",
            FilterKind::Inversion => "inversion",
            FilterKind::Grayscale => "grayscale",
            FilterKind::Blur => "blur",
            FilterKind::Contrast => "contrast",
            FilterKind::Opacity => "opacity",
            FilterKind::Sepia => "sepia",
            FilterKind::Sharpen => "sharpen",
            FilterKind::BorderRadius => "border-radius",
        }
    }

    /// The accepted range and slider step.
    pub fn range(self) -> FilterRange {
        match self {
            FilterKind::Brightness | FilterKind::Saturation | FilterKind::Contrast => {
                FilterRange::new(0.0, 200.0, 1.0)
            }
            FilterKind::Inversion
            | FilterKind::Grayscale
            | FilterKind::Opacity
            | FilterKind::Sepia
            | FilterKind::Sharpen => FilterRange::new(0.0, 100.0, 1.0),
            FilterKind::Blur => FilterRange::new(0.0, 10.0, 0.1),
            FilterKind::BorderRadius => FilterRange::new(0.0, 50.0, 1.0),
        }
    }

    /// The value a fresh or reset editor starts with.
    pub fn default_value(self) -> f32 {
        match self {
            FilterKind::Brightness
            | FilterKind::Saturation
            | FilterKind::Contrast
            | FilterKind::Opacity => 100.0,
            _ => 0.0,
        }
    }

    /// Display label: the name with its first letter capitalized.
    pub fn label(self) -> String {
        let name = self.name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Format a value the way the slider readout shows it.
    pub fn format_value(self, value: f32) -> String {
        match self {
            FilterKind::Blur => format!("{value:.1}px"),
            FilterKind::BorderRadius => format!("{}px", value.round()),
            _ => format!("{}%", value.round()),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| FilterError::UnknownFilter(s.to_string()))
    }
}

/// Inclusive bounds and slider step for one filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl FilterRange {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Check whether `value` lies within the bounds.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp `value` into the bounds.
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// The full set of filter values for one editing session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterVector {
    /// Brightness percent (0 to 200)
    pub brightness: f32,
    /// Saturation percent (0 to 200)
    pub saturation: f32,
    /// Inversion percent (0 to 100)
    pub inversion: f32,
    /// Grayscale percent (0 to 100)
    pub grayscale: f32,
    /// Blur radius in pixels (0 to 10)
    pub blur: f32,
    /// Contrast percent (0 to 200)
    pub contrast: f32,
    /// Opacity percent (0 to 100)
    pub opacity: f32,
    /// Sepia percent (0 to 100)
    pub sepia: f32,
    /// Sharpen percent (0 to 100). Stored only; has no rendering effect.
    pub sharpen: f32,
    /// Corner radius in pixels (0 to 50)
    pub border_radius: f32,
}

impl Default for FilterVector {
    fn default() -> Self {
        Self {
            brightness: 100.0,
            saturation: 100.0,
            inversion: 0.0,
            grayscale: 0.0,
            blur: 0.0,
            contrast: 100.0,
            opacity: 100.0,
            sepia: 0.0,
            sharpen: 0.0,
            border_radius: 0.0,
        }
    }
}

impl FilterVector {
    /// Create a vector holding the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the value for `kind`.
    pub fn get(&self, kind: FilterKind) -> f32 {
        match kind {
            FilterKind::Brightness => self.brightness,
            FilterKind::Saturation => self.saturation,
            FilterKind::Inversion => self.inversion,
            FilterKind::Grayscale => self.grayscale,
            FilterKind::Blur => self.blur,
            FilterKind::Contrast => self.contrast,
            FilterKind::Opacity => self.opacity,
            FilterKind::Sepia => self.sepia,
            FilterKind::Sharpen => self.sharpen,
            FilterKind::BorderRadius => self.border_radius,
        }
    }

    fn slot(&mut self, kind: FilterKind) -> &mut f32 {
        match kind {
            FilterKind::Brightness => &mut self.brightness,
            FilterKind::Saturation => &mut self.saturation,
            FilterKind::Inversion => &mut self.inversion,
            FilterKind::Grayscale => &mut self.grayscale,
            FilterKind::Blur => &mut self.blur,
            FilterKind::Contrast => &mut self.contrast,
            FilterKind::Opacity => &mut self.opacity,
            FilterKind::Sepia => &mut self.sepia,
            FilterKind::Sharpen => &mut self.sharpen,
            FilterKind::BorderRadius => &mut self.border_radius,
        }
    }

    /// Store `value` for `kind` exactly as given.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::NotFinite` for NaN/infinite input and
    /// `FilterError::OutOfRange` outside the kind's range. The vector is
    /// unchanged on error.
    pub fn set(&mut self, kind: FilterKind, value: f32) -> Result<(), FilterError> {
        if !value.is_finite() {
            return Err(FilterError::NotFinite { filter: kind });
        }
        let range = kind.range();
        if !range.contains(value) {
            return Err(FilterError::OutOfRange {
                filter: kind,
                value,
                min: range.min,
                max: range.max,
            });
        }
        *self.slot(kind) = value;
        Ok(())
    }

    /// Store `value` for `kind`, clamped into range. Returns the stored value.
    ///
    /// NaN leaves the current value in place.
    pub fn set_clamped(&mut self, kind: FilterKind, value: f32) -> f32 {
        let slot = self.slot(kind);
        if !value.is_nan() {
            *slot = kind.range().clamp(value);
        }
        *slot
    }

    /// Restore every value to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check if all values are at their defaults.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Check if the color filter chain leaves pixels untouched.
    ///
    /// Ignores `sharpen` and `border_radius`, which do not take part in it.
    pub fn is_render_identity(&self) -> bool {
        let defaults = Self::default();
        Self {
            sharpen: defaults.sharpen,
            border_radius: defaults.border_radius,
            ..*self
        } == defaults
    }

    /// Compose the chain as a single filter operation string, in render order.
    ///
    /// ```text
    /// brightness(100%) saturate(100%) invert(0%) grayscale(0%) blur(0px) contrast(100%) opacity(100%) sepia(0%)
    /// ```
    pub fn to_css_filter(&self) -> String {
        format!(
            "brightness({}%) saturate({}%) invert({}%) grayscale({}%) blur({}px) contrast({}%) opacity({}%) sepia({}%)",
            self.brightness,
            self.saturation,
            self.inversion,
            self.grayscale,
            self.blur,
            self.contrast,
            self.opacity,
            self.sepia,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_vector_default() {
        let filters = FilterVector::new();
        assert!(filters.is_default());
        assert!(filters.is_render_identity());
        assert_eq!(filters.get(FilterKind::Brightness), 100.0);
        assert_eq!(filters.get(FilterKind::Opacity), 100.0);
        assert_eq!(filters.get(FilterKind::Sepia), 0.0);
    }

    #[test]
    fn test_defaults_match_kind_defaults() {
        let filters = FilterVector::default();
        for kind in FilterKind::ALL {
            assert_eq!(filters.get(kind), kind.default_value(), "{kind}");
            assert!(kind.range().contains(kind.default_value()), "{kind}");
        }
    }

    #[test]
    fn test_set_and_read_back() {
        let mut filters = FilterVector::new();
        filters.set(FilterKind::Blur, 2.5).unwrap();
        filters.set(FilterKind::BorderRadius, 50.0).unwrap();

        assert_eq!(filters.get(FilterKind::Blur), 2.5);
        assert_eq!(filters.get(FilterKind::BorderRadius), 50.0);
        assert!(!filters.is_default());
    }

    #[test]
    fn test_set_rejects_out_of_range() {
        let mut filters = FilterVector::new();

        let err = filters.set(FilterKind::Brightness, 201.0).unwrap_err();
        assert_eq!(
            err,
            FilterError::OutOfRange {
                filter: FilterKind::Brightness,
                value: 201.0,
                min: 0.0,
                max: 200.0
            }
        );
        assert!(filters.set(FilterKind::Sepia, -1.0).is_err());
        assert!(filters.is_default());
    }

    #[test]
    fn test_set_rejects_non_finite() {
        let mut filters = FilterVector::new();
        assert!(matches!(
            filters.set(FilterKind::Blur, f32::NAN),
            Err(FilterError::NotFinite { .. })
        ));
        assert!(filters.set(FilterKind::Blur, f32::INFINITY).is_err());
    }

    #[test]
    fn test_set_clamped() {
        let mut filters = FilterVector::new();
        assert_eq!(filters.set_clamped(FilterKind::Blur, 11.0), 10.0);
        assert_eq!(filters.set_clamped(FilterKind::Contrast, -1.0), 0.0);
        assert_eq!(filters.set_clamped(FilterKind::Contrast, f32::NAN), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut filters = FilterVector::new();
        filters.set(FilterKind::Grayscale, 80.0).unwrap();
        filters.reset();
        assert!(filters.is_default());
    }

    #[test]
    fn test_sharpen_and_radius_are_not_color_filters() {
        let mut filters = FilterVector::new();
        filters.set(FilterKind::Sharpen, 100.0).unwrap();
        filters.set(FilterKind::BorderRadius, 20.0).unwrap();
        assert!(!filters.is_default());
        assert!(filters.is_render_identity());
    }

    #[test]
    fn test_css_filter_string() {
        let mut filters = FilterVector::new();
        assert_eq!(
            filters.to_css_filter(),
            "brightness(100%) saturate(100%) invert(0%) grayscale(0%) blur(0px) contrast(100%) opacity(100%) sepia(0%)"
        );

        filters.set(FilterKind::Blur, 2.5).unwrap();
        filters.set(FilterKind::Inversion, 40.0).unwrap();
        assert!(filters.to_css_filter().contains("invert(40%)"));
        assert!(filters.to_css_filter().contains("blur(2.5px)"));
    }

    #[test]
    fn test_kind_name_round_trip() {
        for kind in FilterKind::ALL {
            assert_eq!(kind.name().parse::<FilterKind>().unwrap(), kind);
        }
        assert!(matches!(
            "sharpness".parse::<FilterKind>(),
            Err(FilterError::UnknownFilter(_))
        ));
    }

    #[test]
    fn test_labels_and_display_values() {
        assert_eq!(FilterKind::Brightness.label(), "Brightness");
        assert_eq!(FilterKind::BorderRadius.label(), "Border-radius");

        assert_eq!(FilterKind::Brightness.format_value(99.6), "100%");
        assert_eq!(FilterKind::Blur.format_value(2.0), "2.0px");
        assert_eq!(FilterKind::BorderRadius.format_value(12.0), "12px");
        assert_eq!(FilterKind::Sepia.format_value(30.0), "30%");
    }

    #[test]
    fn test_kind_serde_names() {
        assert_eq!(FilterKind::ALL.len(), 10);
        assert_eq!(FilterKind::BorderRadius.to_string(), "border-radius");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
