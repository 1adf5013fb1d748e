//! Corner mask evaluation.
//!
//! Each corner is a quadrant of side `r` with its own circle anchor:
//!
//! | Corner       | Region                  | Anchor           |
//! |--------------|-------------------------|------------------|
//! | top-left     | `x < r && y < r`        | `(r, r)`         |
//! | top-right    | `x > w-r && y < r`      | `(w-r, r)`       |
//! | bottom-right | `x > w-r && y > h-r`    | `(w-r, h-r)`     |
//! | bottom-left  | `x < r && y > h-r`      | `(r, h-r)`       |
//!
//! Regions are tested in table order and the first match wins, which
//! matters once `r` exceeds half the width or height and regions overlap.

use crate::decode::PixelBuffer;

/// One of the four masked corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// Find the corner region containing (x, y), if any.
    pub fn locate(x: f64, y: f64, width: f64, height: f64, radius: f64) -> Option<Self> {
        let right = width - radius;
        let bottom = height - radius;

        if x < radius && y < radius {
            Some(Corner::TopLeft)
        } else if x > right && y < radius {
            Some(Corner::TopRight)
        } else if x > right && y > bottom {
            Some(Corner::BottomRight)
        } else if x < radius && y > bottom {
            Some(Corner::BottomLeft)
        } else {
            None
        }
    }

    /// Circle center this corner is measured from.
    pub fn anchor(self, width: f64, height: f64, radius: f64) -> (f64, f64) {
        match self {
            Corner::TopLeft => (radius, radius),
            Corner::TopRight => (width - radius, radius),
            Corner::BottomRight => (width - radius, height - radius),
            Corner::BottomLeft => (radius, height - radius),
        }
    }
}

/// Distance from (x, y) to its corner's anchor, or `None` outside every
/// corner region.
pub fn corner_distance(x: u32, y: u32, width: u32, height: u32, radius: f64) -> Option<f64> {
    let (x, y) = (x as f64, y as f64);
    let (w, h) = (width as f64, height as f64);

    let corner = Corner::locate(x, y, w, h, radius)?;
    let (ax, ay) = corner.anchor(w, h, radius);

    Some(((x - ax).powi(2) + (y - ay).powi(2)).sqrt())
}

/// Clear alpha outside the rounded corners of `image`, in place.
///
/// Pixels inside a corner region farther than `radius` from its anchor
/// become fully transparent; every other sample is left untouched. There
/// is no anti-aliasing. A radius of zero or less does nothing.
pub fn apply_corner_mask(image: &mut PixelBuffer, radius: f32) {
    if radius <= 0.0 || !radius.is_finite() || image.is_empty() {
        return;
    }

    let r = radius as f64;
    let (width, height) = (image.width, image.height);

    for y in 0..height {
        for x in 0..width {
            if let Some(distance) = corner_distance(x, y, width, height, r) {
                if distance > r {
                    let i = image.offset(x, y);
                    image.pixels[i + 3] = 0;
                }
            }
        }
    }
}
