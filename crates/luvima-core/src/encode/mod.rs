//! Image encoding for export.
//!
//! This module provides functionality for:
//! - Encoding the rendered surface to PNG (alpha preserved, so rounded
//!   corners survive export)
//! - Naming exported files with a millisecond timestamp
//!
//! # Examples
//!
//! ```ignore
//! use luvima_core::encode::{encode_png, export_file_name};
//!
//! let png = encode_png(&rendered).unwrap();
//! let name = export_file_name("luvima-edited", 1_700_000_000_000);
//! ```

mod png;

pub use png::{current_timestamp_ms, encode_png, export_file_name, EncodeError, PNG_SIGNATURE};
