//! Luvima WASM - WebAssembly bindings for Luvima
//!
//! This crate exposes the luvima-core editor and signup form to
//! JavaScript, and supplies the browser side of the effects the core
//! leaves abstract: file download, the background-removal request and the
//! simulated signup submission.
//!
//! # Module Structure
//!
//! - `editor` - The image editor (`JsEditor`)
//! - `signup` - Signup validation, strength meter and submission
//! - `types` - WASM-compatible wrapper types for image data
//! - `download` - Blob URL downloads
//! - `remote` - `fetch`-based background removal
//! - `logger` - `log` backend writing to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditor } from '@luvima/wasm';
//!
//! await init();
//!
//! const editor = new JsEditor({ max_surface_width: 800 });
//! editor.load(new Uint8Array(await file.arrayBuffer()), file.type);
//! editor.set_filter('sepia', 60);
//! const frame = editor.render();
//! ctx.putImageData(new ImageData(new Uint8ClampedArray(frame.pixels()), frame.width), 0, 0);
//! ```

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

mod download;
mod editor;
mod logger;
mod remote;
mod signup;
mod types;

pub use editor::JsEditor;
pub use signup::{
    confirmation_feedback, email_feedback, password_strength, password_strength_label,
    password_strength_level, submit_signup, validate_signup,
};
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Convert any displayable error into a JS string value.
pub(crate) fn to_js_error<E: std::fmt::Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Deserialize a JS options object, using defaults for `undefined`/`null`.
pub(crate) fn options_or_default<T>(value: JsValue) -> Result<T, JsValue>
where
    T: DeserializeOwned + Default,
{
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))
}
