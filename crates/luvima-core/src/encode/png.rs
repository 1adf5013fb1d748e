//! PNG encoding for export.
//!
//! Uses the `image` crate's PNG encoder on RGBA data. PNG is lossless and
//! keeps the alpha channel written by the corner mask and by transparent
//! surface regions.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;
use web_time::{SystemTime, UNIX_EPOCH};

use crate::decode::PixelBuffer;

/// The 8-byte signature every PNG file starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an RGBA pixel buffer to PNG bytes.
///
/// # Errors
///
/// Returns an error if either dimension is zero, if the pixel data length
/// doesn't match `width * height * 4`, or if the encoder fails.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
    let PixelBuffer {
        width,
        height,
        ref pixels,
    } = *buffer;

    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    let mut out = Cursor::new(Vec::new());
    PngEncoder::new(&mut out)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out.into_inner())
}

/// Build the download name for an export: `<prefix>-<timestamp_ms>.png`.
pub fn export_file_name(prefix: &str, timestamp_ms: u64) -> String {
    format!("{prefix}-{timestamp_ms}.png")
}

/// Milliseconds since the Unix epoch, using `Date.now()` on WASM.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
