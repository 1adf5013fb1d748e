//! Crop rectangles and slicing.
//!
//! The crop tool works in surface-local floating-point coordinates (pointer
//! positions). Committing a crop truncates the rectangle to whole pixels,
//! and slicing copies that pixel region out of a rendered buffer.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left corner of the current surface
//! - A later crop is relative to the surface left by the earlier ones

use serde::{Deserialize, Serialize};

use crate::decode::PixelBuffer;

/// A pointer position on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in surface coordinates with non-negative extents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    /// Normalize two corner points, in any order, into a rectangle.
    pub fn from_points(start: Point, end: Point) -> Self {
        Self {
            x: start.x.min(end.x),
            y: start.y.min(end.y),
            width: (end.x - start.x).abs(),
            height: (end.y - start.y).abs(),
        }
    }

    /// Check if both extents reach `min_extent`.
    pub fn meets_minimum(&self, min_extent: f64) -> bool {
        self.width >= min_extent && self.height >= min_extent
    }

    /// Truncate to whole pixels.
    pub fn to_pixels(&self) -> PixelRect {
        PixelRect {
            x: self.x.trunc() as i64,
            y: self.y.trunc() as i64,
            width: self.width.trunc().max(0.0) as u32,
            height: self.height.trunc().max(0.0) as u32,
        }
    }
}

/// A committed crop region in whole pixels.
///
/// The origin may lie outside the surface; the region it covers there is
/// transparent in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Intersect with a `width × height` surface whose origin is (0, 0).
    ///
    /// Returns `None` when no part of the region lies on the surface.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<PixelRect> {
        let (surface_w, surface_h) = (i64::from(width), i64::from(height));

        let left = self.x.clamp(0, surface_w);
        let top = self.y.clamp(0, surface_h);
        let right = self.x.saturating_add(i64::from(self.width)).clamp(0, surface_w);
        let bottom = self.y.saturating_add(i64::from(self.height)).clamp(0, surface_h);

        if left >= right || top >= bottom {
            return None;
        }

        Some(PixelRect {
            x: left,
            y: top,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }
}

/// Copy the `rect` region out of `image`.
///
/// The output is exactly `rect.width × rect.height`. Samples that fall
/// outside `image` are transparent black.
///
/// # Arguments
///
/// * `image` - Rendered buffer to slice
/// * `rect` - Region to keep, in `image` pixel coordinates
///
/// # Returns
///
/// A new `PixelBuffer` containing only the cropped region.
pub fn apply_crop(image: &PixelBuffer, rect: &PixelRect) -> PixelBuffer {
    // Fast path: region is the whole image
    if rect.x == 0
        && rect.y == 0
        && rect.width == image.width
        && rect.height == image.height
    {
        return image.clone();
    }

    let mut output = PixelBuffer::transparent(rect.width, rect.height);

    // Overlap of the region with the image, in image coordinates
    let left = rect.x.max(0);
    let top = rect.y.max(0);
    let right = rect
        .x
        .saturating_add(i64::from(rect.width))
        .min(i64::from(image.width));
    let bottom = rect
        .y
        .saturating_add(i64::from(rect.height))
        .min(i64::from(image.height));

    if left >= right || top >= bottom {
        return output;
    }

    // Copy pixel data row by row
    let row_bytes = (right - left) as usize * 4;
    for src_y in top..bottom {
        let src_start = image.offset(left as u32, src_y as u32);
        let dst_start = output.offset((left - rect.x) as u32, (src_y - rect.y) as u32);

        output.pixels[dst_start..dst_start + row_bytes]
            .copy_from_slice(&image.pixels[src_start..src_start + row_bytes]);
    }

    output
}

/// Apply a sequence of crops, each relative to the previous result.
///
/// Each region is first clipped to the surface it applies to, so the output
/// never grows past the surface. A region entirely off the surface is
/// skipped.
pub fn apply_crops(image: PixelBuffer, crops: &[PixelRect]) -> PixelBuffer {
    crops.iter().fold(image, |current, rect| {
        match rect.clamp_to(current.width, current.height) {
            Some(region) => apply_crop(&current, &region),
            None => {
                log::debug!("crop {rect:?} misses the {}x{} surface", current.width, current.height);
                current
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        PixelBuffer::new(width, height, pixels)
    }

    fn rect(x: i64, y: i64, width: u32, height: u32) -> PixelRect {
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn test_from_points_normalizes() {
        let r = CropRect::from_points(Point::new(110.0, 60.0), Point::new(10.0, 10.0));
        assert_eq!(r, CropRect { x: 10.0, y: 10.0, width: 100.0, height: 50.0 });
    }

    #[test]
    fn test_meets_minimum() {
        let r = CropRect::from_points(Point::new(0.0, 0.0), Point::new(10.0, 9.5));
        assert!(!r.meets_minimum(10.0));

        let r = CropRect::from_points(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert!(r.meets_minimum(10.0));
    }

    #[test]
    fn test_to_pixels_truncates() {
        let r = CropRect { x: 10.7, y: 3.2, width: 99.9, height: 50.5 };
        assert_eq!(r.to_pixels(), rect(10, 3, 99, 50));
    }

    #[test]
    fn test_drag_on_surface_gives_expected_size() {
        let img = test_image(400, 300);
        let r = CropRect::from_points(Point::new(10.0, 10.0), Point::new(110.0, 60.0));
        let result = apply_crop(&img, &r.to_pixels());

        assert_eq!(result.width, 100);
        assert_eq!(result.height, 50);
        assert_eq!(result.pixel(0, 0), img.pixel(10, 10));
    }

    #[test]
    fn test_full_crop() {
        let img = test_image(50, 50);
        let result = apply_crop(&img, &rect(0, 0, 50, 50));
        assert_eq!(result, img);
    }

    #[test]
    fn test_crop_pixel_values_preserved() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &rect(3, 3, 4, 4));

        // Value at (3, 3) = 3 * 10 + 3 = 33
        assert_eq!(result.pixel(0, 0), [33, 33, 33, 255]);
        // Value at (6, 6) = 66
        assert_eq!(result.pixel(3, 3), [66, 66, 66, 255]);
    }

    #[test]
    fn test_region_past_edge_is_transparent() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &rect(8, 8, 4, 4));

        assert_eq!(result.width, 4);
        assert_eq!(result.height, 4);
        assert_eq!(result.pixel(0, 0), img.pixel(8, 8));
        assert_eq!(result.pixel(1, 1), img.pixel(9, 9));
        assert_eq!(result.pixel(2, 2), [0, 0, 0, 0]);
        assert_eq!(result.pixel(3, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_negative_origin_is_transparent() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &rect(-2, -2, 4, 4));

        assert_eq!(result.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(result.pixel(2, 2), img.pixel(0, 0));
    }

    #[test]
    fn test_region_fully_outside() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &rect(20, 20, 5, 5));

        assert_eq!((result.width, result.height), (5, 5));
        assert!(result.pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_successive_crops_compose() {
        let img = test_image(20, 20);
        let result = apply_crops(img.clone(), &[rect(5, 5, 10, 10), rect(2, 3, 4, 4)]);

        assert_eq!((result.width, result.height), (4, 4));
        assert_eq!(result.pixel(0, 0), img.pixel(7, 8));
    }

    #[test]
    fn test_later_crop_does_not_reveal_earlier_cut() {
        let img = test_image(20, 20);
        // Second crop reaches past the 4x4 surface left by the first
        let result = apply_crops(img.clone(), &[rect(0, 0, 4, 4), rect(2, 2, 4, 4)]);

        assert_eq!((result.width, result.height), (2, 2));
        assert_eq!(result.pixel(0, 0), img.pixel(2, 2));
        assert_eq!(result.pixel(1, 1), img.pixel(3, 3));
    }

    #[test]
    fn test_clamp_to_surface() {
        assert_eq!(rect(5, 5, 10, 10).clamp_to(20, 20), Some(rect(5, 5, 10, 10)));
        assert_eq!(rect(-5, 10, 10, 100).clamp_to(20, 20), Some(rect(0, 10, 5, 10)));
        assert_eq!(rect(20, 0, 5, 5).clamp_to(20, 20), None);
        assert_eq!(
            rect(i64::MAX, i64::MAX, u32::MAX, u32::MAX).clamp_to(20, 20),
            None
        );
    }

    #[test]
    fn test_extreme_origin_does_not_overflow() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &rect(i64::MAX, 0, 20, 20));

        assert_eq!((result.width, result.height), (20, 20));
        assert!(result.pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_huge_crop_is_bounded_by_surface() {
        let img = test_image(100, 80);
        let r = CropRect::from_points(Point::new(50.0, 40.0), Point::new(5e9, 1e6));
        let result = apply_crops(img.clone(), &[r.to_pixels()]);

        assert_eq!((result.width, result.height), (50, 40));
        assert_eq!(result.pixel(0, 0), img.pixel(50, 40));
    }

    #[test]
    fn test_crop_off_surface_is_skipped() {
        let img = test_image(10, 10);
        let result = apply_crops(img.clone(), &[rect(30, 30, 10, 10)]);
        assert_eq!(result, img);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
