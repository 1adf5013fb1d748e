//! Image decoding for the editor.
//!
//! This module provides functionality for:
//! - Rejecting files whose declared type is not an image
//! - Decoding any format the `image` crate recognizes into RGBA
//! - Applying EXIF orientation the way browsers do when decoding
//!
//! # Examples
//!
//! ```ignore
//! use luvima_core::decode::decode_file;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_file(&bytes, "image/jpeg").unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod decoder;
mod types;

pub use decoder::{decode_file, decode_image, decode_image_no_orientation, is_image_type};
pub use types::{DecodeError, Orientation, PixelBuffer};
