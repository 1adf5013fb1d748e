//! Remote background removal.
//!
//! The transport is injected: the browser build posts multipart form data
//! with `fetch`, tests use an in-memory stub.

use std::future::Future;

use thiserror::Error;

use crate::decode::DecodeError;

/// Multipart field the PNG is sent in.
pub const FORM_FIELD: &str = "image";

/// File name attached to the multipart field.
pub const FORM_FILE_NAME: &str = "image.png";

/// Ways a background-removal round trip can fail.
#[derive(Debug, Error)]
pub enum RemoveBgError {
    /// The server answered with a non-success status.
    #[error("server responded with status {0}")]
    Status(u16),

    /// The request never completed.
    #[error("{0}")]
    Network(String),

    /// The response body is not a decodable image.
    #[error("invalid image in response: {0}")]
    InvalidImage(#[from] DecodeError),
}

/// A service that returns the given PNG with its background removed.
pub trait BackgroundRemover {
    /// Send `png` and resolve to the encoded replacement image.
    fn remove_background(
        &self,
        png: Vec<u8>,
    ) -> impl Future<Output = Result<Vec<u8>, RemoveBgError>>;
}

/// Check if an HTTP status code counts as success.
pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}
