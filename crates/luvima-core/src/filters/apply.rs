//! Filter chain rendering.
//!
//! Applies the color filters of a [`FilterVector`] to RGBA pixel data using
//! the Filter Effects definitions (linear brightness/contrast, color-matrix
//! saturate/grayscale/sepia, lerped invert, alpha-scaling opacity, Gaussian
//! blur). Each stage clamps its output to the displayable range before the
//! next one runs.

use image::{GrayImage, Luma};

use super::FilterVector;
use crate::decode::PixelBuffer;

/// Amounts for the per-pixel stages, already converted from percent.
#[derive(Debug, Clone, Copy)]
struct Amounts {
    brightness: f32,
    saturate: f32,
    invert: f32,
    grayscale: f32,
    contrast: f32,
    opacity: f32,
    sepia: f32,
}

impl From<&FilterVector> for Amounts {
    fn from(f: &FilterVector) -> Self {
        Self {
            brightness: (f.brightness / 100.0).max(0.0),
            saturate: (f.saturation / 100.0).max(0.0),
            invert: (f.inversion / 100.0).clamp(0.0, 1.0),
            grayscale: (f.grayscale / 100.0).clamp(0.0, 1.0),
            contrast: (f.contrast / 100.0).max(0.0),
            opacity: (f.opacity / 100.0).clamp(0.0, 1.0),
            sepia: (f.sepia / 100.0).clamp(0.0, 1.0),
        }
    }
}

/// Apply the filter chain to a buffer in place.
///
/// Stages run in the fixed order brightness, saturate, invert, grayscale,
/// blur, contrast, opacity, sepia. A vector that is an identity for the
/// chain returns without touching the buffer.
pub fn apply_filters(buffer: &mut PixelBuffer, filters: &FilterVector) {
    if filters.is_render_identity() {
        return;
    }

    let amounts = Amounts::from(filters);

    for px in buffer.pixels.chunks_exact_mut(4) {
        let (mut r, mut g, mut b) = to_unit(px);
        (r, g, b) = clamp3(apply_brightness(r, g, b, amounts.brightness));
        (r, g, b) = clamp3(apply_saturate(r, g, b, amounts.saturate));
        (r, g, b) = clamp3(apply_invert(r, g, b, amounts.invert));
        (r, g, b) = clamp3(apply_grayscale(r, g, b, amounts.grayscale));
        from_unit(px, r, g, b);
    }

    if filters.blur > 0.0 {
        *buffer = gaussian_blur_rgba(buffer, filters.blur);
    }

    for px in buffer.pixels.chunks_exact_mut(4) {
        let (mut r, mut g, mut b) = to_unit(px);
        (r, g, b) = clamp3(apply_contrast(r, g, b, amounts.contrast));
        (r, g, b) = clamp3(apply_sepia(r, g, b, amounts.sepia));
        from_unit(px, r, g, b);
        if amounts.opacity < 1.0 {
            px[3] = to_byte(px[3] as f32 / 255.0 * amounts.opacity);
        }
    }
}

#[inline]
fn to_unit(px: &[u8]) -> (f32, f32, f32) {
    (
        px[0] as f32 / 255.0,
        px[1] as f32 / 255.0,
        px[2] as f32 / 255.0,
    )
}

#[inline]
fn from_unit(px: &mut [u8], r: f32, g: f32, b: f32) {
    px[0] = to_byte(r);
    px[1] = to_byte(g);
    px[2] = to_byte(b);
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[inline]
fn clamp3((r, g, b): (f32, f32, f32)) -> (f32, f32, f32) {
    (r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
}

/// Apply brightness: a linear multiplier on every color channel.
///
/// Formula: `output = input * amount`
#[inline]
fn apply_brightness(r: f32, g: f32, b: f32, amount: f32) -> (f32, f32, f32) {
    if amount == 1.0 {
        return (r, g, b);
    }
    (r * amount, g * amount, b * amount)
}

/// Apply saturate using the Filter Effects color matrix.
///
/// 0 is fully desaturated, 1 is unchanged, values above 1 oversaturate.
#[inline]
fn apply_saturate(r: f32, g: f32, b: f32, s: f32) -> (f32, f32, f32) {
    if s == 1.0 {
        return (r, g, b);
    }
    (
        (0.213 + 0.787 * s) * r + (0.715 - 0.715 * s) * g + (0.072 - 0.072 * s) * b,
        (0.213 - 0.213 * s) * r + (0.715 + 0.285 * s) * g + (0.072 - 0.072 * s) * b,
        (0.213 - 0.213 * s) * r + (0.715 - 0.715 * s) * g + (0.072 + 0.928 * s) * b,
    )
}

/// Apply invert: lerp each channel toward its complement.
///
/// Formula: `output = input * (1 - amount) + (1 - input) * amount`
#[inline]
fn apply_invert(r: f32, g: f32, b: f32, amount: f32) -> (f32, f32, f32) {
    if amount == 0.0 {
        return (r, g, b);
    }
    let inv = |c: f32| c * (1.0 - amount) + (1.0 - c) * amount;
    (inv(r), inv(g), inv(b))
}

/// Apply grayscale using BT.709 luma weights.
#[inline]
fn apply_grayscale(r: f32, g: f32, b: f32, amount: f32) -> (f32, f32, f32) {
    if amount == 0.0 {
        return (r, g, b);
    }
    let s = 1.0 - amount;
    (
        (0.2126 + 0.7874 * s) * r + (0.7152 - 0.7152 * s) * g + (0.0722 - 0.0722 * s) * b,
        (0.2126 - 0.2126 * s) * r + (0.7152 + 0.2848 * s) * g + (0.0722 - 0.0722 * s) * b,
        (0.2126 - 0.2126 * s) * r + (0.7152 - 0.7152 * s) * g + (0.0722 + 0.9278 * s) * b,
    )
}

/// Apply contrast around the 0.5 midpoint.
///
/// Formula: `output = (input - 0.5) * amount + 0.5`
#[inline]
fn apply_contrast(r: f32, g: f32, b: f32, amount: f32) -> (f32, f32, f32) {
    if amount == 1.0 {
        return (r, g, b);
    }
    let midpoint = 0.5;
    (
        (r - midpoint) * amount + midpoint,
        (g - midpoint) * amount + midpoint,
        (b - midpoint) * amount + midpoint,
    )
}

/// Apply sepia using the Filter Effects color matrix.
#[inline]
fn apply_sepia(r: f32, g: f32, b: f32, amount: f32) -> (f32, f32, f32) {
    if amount == 0.0 {
        return (r, g, b);
    }
    let s = 1.0 - amount;
    (
        (0.393 + 0.607 * s) * r + (0.769 - 0.769 * s) * g + (0.189 - 0.189 * s) * b,
        (0.349 - 0.349 * s) * r + (0.686 + 0.314 * s) * g + (0.168 - 0.168 * s) * b,
        (0.272 - 0.272 * s) * r + (0.534 - 0.534 * s) * g + (0.131 + 0.869 * s) * b,
    )
}

/// Gaussian-blur an RGBA buffer with standard deviation `sigma` pixels.
///
/// `imageproc::filter::gaussian_blur_f32` works on single-channel images,
/// so the buffer is split into premultiplied channels, blurred, and
/// reassembled. Premultiplying keeps transparent neighbors from darkening
/// edges. Non-positive sigma returns a copy.
pub fn gaussian_blur_rgba(buffer: &PixelBuffer, sigma: f32) -> PixelBuffer {
    if sigma <= 0.0 || buffer.is_empty() {
        return buffer.clone();
    }

    let (w, h) = (buffer.width, buffer.height);

    let channels: [GrayImage; 4] = std::array::from_fn(|c| {
        GrayImage::from_fn(w, h, |x, y| {
            let px = buffer.pixel(x, y);
            if c == 3 {
                Luma([px[3]])
            } else {
                let premultiplied = px[c] as u32 * px[3] as u32 / 255;
                Luma([premultiplied as u8])
            }
        })
    });

    let blurred: [GrayImage; 4] =
        std::array::from_fn(|c| imageproc::filter::gaussian_blur_f32(&channels[c], sigma));

    let mut out = PixelBuffer::transparent(w, h);
    for y in 0..h {
        for x in 0..w {
            let a = blurred[3].get_pixel(x, y).0[0];
            let i = out.offset(x, y);
            out.pixels[i + 3] = a;
            if a == 0 {
                continue;
            }
            for c in 0..3 {
                let v = blurred[c].get_pixel(x, y).0[0] as u32 * 255 / a as u32;
                out.pixels[i + c] = v.min(255) as u8;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterKind;

    fn one_pixel(rgba: [u8; 4]) -> PixelBuffer {
        PixelBuffer::new(1, 1, rgba.to_vec())
    }

    fn filtered(rgba: [u8; 4], kind: FilterKind, value: f32) -> [u8; 4] {
        let mut buf = one_pixel(rgba);
        let mut filters = FilterVector::default();
        filters.set(kind, value).unwrap();
        apply_filters(&mut buf, &filters);
        buf.pixel(0, 0)
    }

    #[test]
    fn test_identity_no_filters() {
        let mut buf = PixelBuffer::filled(3, 3, [12, 34, 56, 78]);
        let original = buf.clone();
        apply_filters(&mut buf, &FilterVector::default());
        assert_eq!(buf, original);
    }

    #[test]
    fn test_sharpen_has_no_effect() {
        assert_eq!(
            filtered([12, 34, 56, 255], FilterKind::Sharpen, 100.0),
            [12, 34, 56, 255]
        );
    }

    #[test]
    fn test_brightness_doubles() {
        assert_eq!(
            filtered([64, 32, 16, 255], FilterKind::Brightness, 200.0),
            [128, 64, 32, 255]
        );
    }

    #[test]
    fn test_brightness_zero_is_black() {
        assert_eq!(
            filtered([200, 150, 100, 255], FilterKind::Brightness, 0.0),
            [0, 0, 0, 255]
        );
    }

    #[test]
    fn test_brightness_clips_at_white() {
        assert_eq!(
            filtered([200, 200, 200, 255], FilterKind::Brightness, 200.0),
            [255, 255, 255, 255]
        );
    }

    #[test]
    fn test_full_inversion() {
        assert_eq!(
            filtered([0, 255, 100, 255], FilterKind::Inversion, 100.0),
            [255, 0, 155, 255]
        );
    }

    #[test]
    fn test_half_inversion_is_mid_gray() {
        let px = filtered([0, 255, 0, 255], FilterKind::Inversion, 50.0);
        assert_eq!(px[0], 128);
        assert_eq!(px[1], 128);
    }

    #[test]
    fn test_full_grayscale_of_red() {
        let px = filtered([255, 0, 0, 255], FilterKind::Grayscale, 100.0);
        assert_eq!(px, [54, 54, 54, 255]);
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        let px = filtered([255, 0, 0, 255], FilterKind::Saturation, 0.0);
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }

    #[test]
    fn test_oversaturation_pushes_channels_apart() {
        let px = filtered([180, 120, 120, 255], FilterKind::Saturation, 200.0);
        assert!(px[0] > 180);
        assert!(px[1] < 120);
    }

    #[test]
    fn test_zero_contrast_is_mid_gray() {
        assert_eq!(
            filtered([0, 255, 30, 255], FilterKind::Contrast, 0.0),
            [128, 128, 128, 255]
        );
    }

    #[test]
    fn test_contrast_increase_spreads_values() {
        let px = filtered([100, 155, 128, 255], FilterKind::Contrast, 200.0);
        assert!(px[0] < 100);
        assert!(px[1] > 155);
    }

    #[test]
    fn test_opacity_scales_alpha_only() {
        assert_eq!(
            filtered([10, 20, 30, 255], FilterKind::Opacity, 50.0),
            [10, 20, 30, 128]
        );
        assert_eq!(
            filtered([10, 20, 30, 255], FilterKind::Opacity, 0.0),
            [10, 20, 30, 0]
        );
    }

    #[test]
    fn test_full_sepia_of_white() {
        assert_eq!(
            filtered([255, 255, 255, 255], FilterKind::Sepia, 100.0),
            [255, 255, 239, 255]
        );
    }

    #[test]
    fn test_color_filters_keep_alpha() {
        let px = filtered([90, 90, 90, 77], FilterKind::Grayscale, 60.0);
        assert_eq!(px[3], 77);
    }

    #[test]
    fn test_blur_preserves_dimensions() {
        let mut buf = PixelBuffer::filled(17, 9, [10, 20, 30, 255]);
        let mut filters = FilterVector::default();
        filters.set(FilterKind::Blur, 3.0).unwrap();
        apply_filters(&mut buf, &filters);
        assert_eq!((buf.width, buf.height), (17, 9));
        assert_eq!(buf.pixels.len(), 17 * 9 * 4);
    }

    #[test]
    fn test_blur_uniform_image_stays_uniform() {
        let buf = PixelBuffer::filled(12, 12, [100, 150, 200, 255]);
        let blurred = gaussian_blur_rgba(&buf, 2.0);
        for chunk in blurred.pixels.chunks_exact(4) {
            for c in 0..4 {
                let expected = [100i32, 150, 200, 255][c];
                assert!((chunk[c] as i32 - expected).abs() <= 1);
            }
        }
    }

    #[test]
    fn test_blur_smooths_sharp_edge() {
        let mut buf = PixelBuffer::filled(10, 10, [0, 0, 0, 255]);
        for y in 0..10 {
            for x in 5..10 {
                let i = buf.offset(x, y);
                buf.pixels[i..i + 3].copy_from_slice(&[255, 255, 255]);
            }
        }
        let blurred = gaussian_blur_rgba(&buf, 2.0);

        let left = blurred.pixel(4, 5)[0];
        let right = blurred.pixel(5, 5)[0];
        assert!(left > 0);
        assert!(right < 255);
    }

    #[test]
    fn test_blur_zero_sigma_returns_copy() {
        let buf = PixelBuffer::filled(4, 4, [1, 2, 3, 4]);
        assert_eq!(gaussian_blur_rgba(&buf, 0.0), buf);
    }

    #[test]
    fn test_filters_apply_in_fixed_order() {
        // Brightness runs before contrast: 0.4 * 2 = 0.8, then (0.8 - 0.5) * 0 + 0.5.
        let mut buf = one_pixel([102, 102, 102, 255]);
        let mut filters = FilterVector::default();
        filters.set(FilterKind::Brightness, 200.0).unwrap();
        filters.set(FilterKind::Contrast, 0.0).unwrap();
        apply_filters(&mut buf, &filters);
        assert_eq!(buf.pixel(0, 0), [128, 128, 128, 255]);
    }

    #[test]
    fn test_empty_buffer() {
        let mut buf = PixelBuffer::new(0, 0, vec![]);
        let mut filters = FilterVector::default();
        filters.set(FilterKind::Blur, 1.0).unwrap();
        apply_filters(&mut buf, &filters);
        assert!(buf.is_empty());
    }
}
