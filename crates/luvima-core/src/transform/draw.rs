//! Drawing the source image onto the editing surface.
//!
//! The surface is the source scaled to fit the configured maximum size.
//! The image is drawn to the full surface bounds under the transform
//!
//! ```text
//! translate(center) · rotate(θ) · scale(±1, ±1) · translate(-center)
//! ```
//!
//! using inverse mapping: for each surface pixel we undo the transform to
//! find the point of the drawn image it shows, then sample the source
//! there. Surface pixels the rotated image does not cover stay
//! transparent, and the surface never changes size when rotating.

use serde::{Deserialize, Serialize};

use super::TransformState;
use crate::decode::PixelBuffer;

/// Interpolation filter used when sampling the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationFilter {
    /// Nearest neighbor - exact pixel copies.
    Nearest,
    /// Bilinear interpolation - smooth when scaling down.
    #[default]
    Bilinear,
}

/// Fit `width × height` within `max_width × max_height`, keeping the aspect
/// ratio and truncating to whole pixels.
///
/// Images that already fit are returned unchanged; nothing is scaled up.
pub fn fit_surface(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let ratio = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    let w = (width as f64 * ratio) as u32;
    let h = (height as f64 * ratio) as u32;

    (w.max(1), h.max(1))
}

/// Exact cosine/sine for quarter turns, trigonometry otherwise.
fn rotation_terms(degrees: i64) -> (f64, f64) {
    match degrees {
        0 => (1.0, 0.0),
        90 => (0.0, 1.0),
        180 => (-1.0, 0.0),
        270 => (0.0, -1.0),
        d => {
            let rad = (d as f64).to_radians();
            (rad.cos(), rad.sin())
        }
    }
}

/// Draw `source` scaled to a `surface_width × surface_height` surface under
/// `transform`.
///
/// Every call produces a fresh buffer; nothing from a previous render
/// carries over.
pub fn draw_transformed(
    source: &PixelBuffer,
    transform: &TransformState,
    surface_width: u32,
    surface_height: u32,
    filter: InterpolationFilter,
) -> PixelBuffer {
    if source.is_empty() || surface_width == 0 || surface_height == 0 {
        return PixelBuffer::transparent(surface_width, surface_height);
    }

    // Fast path: nothing to rotate, flip or scale
    if transform.is_identity() && source.width == surface_width && source.height == surface_height
    {
        return source.clone();
    }

    let (w, h) = (surface_width as f64, surface_height as f64);
    let (cx, cy) = (w / 2.0, h / 2.0);
    let (cos, sin) = rotation_terms(transform.normalized_rotation());
    let sx = if transform.flip_horizontal { -1.0 } else { 1.0 };
    let sy = if transform.flip_vertical { -1.0 } else { 1.0 };

    // Drawn-image coordinates to source pixel coordinates
    let scale_x = source.width as f64 / w;
    let scale_y = source.height as f64 / h;

    let mut output = PixelBuffer::transparent(surface_width, surface_height);

    for dst_y in 0..surface_height {
        for dst_x in 0..surface_width {
            // Pixel center relative to the surface center
            let px = dst_x as f64 + 0.5 - cx;
            let py = dst_y as f64 + 0.5 - cy;

            // Inverse rotation, then inverse flip
            let ux = (px * cos + py * sin) * sx;
            let uy = (-px * sin + py * cos) * sy;

            let lx = ux + cx;
            let ly = uy + cy;
            if lx < 0.0 || ly < 0.0 || lx >= w || ly >= h {
                continue;
            }

            let src_x = lx * scale_x;
            let src_y = ly * scale_y;

            let pixel = match filter {
                InterpolationFilter::Nearest => sample_nearest(source, src_x, src_y),
                InterpolationFilter::Bilinear => sample_bilinear(source, src_x - 0.5, src_y - 0.5),
            };

            let i = output.offset(dst_x, dst_y);
            output.pixels[i..i + 4].copy_from_slice(&pixel);
        }
    }

    output
}

/// Sample the source pixel containing (x, y).
#[inline]
fn sample_nearest(image: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    let px = (x.floor().max(0.0) as u32).min(image.width - 1);
    let py = (y.floor().max(0.0) as u32).min(image.height - 1);
    image.pixel(px, py)
}

/// Sample a pixel using bilinear interpolation.
///
/// Coordinates are in pixel-center space and clamped to the image edge, so
/// the border is extended rather than faded.
fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64) -> [u8; 4] {
    let x = x.clamp(0.0, (image.width - 1) as f64);
    let y = y.clamp(0.0, (image.height - 1) as f64);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}
