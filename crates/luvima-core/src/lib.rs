//! Luvima Core - image editing and signup validation library
//!
//! This crate provides the platform-independent parts of Luvima: decoding,
//! the filter chain, rotation/flip/crop transforms, the corner mask, PNG
//! export, the editor state machine with undo, and the signup form checks.
//! Browser bindings live in `luvima-wasm`.

pub mod config;
pub mod decode;
pub mod editor;
pub mod encode;
pub mod filters;
pub mod keyboard;
pub mod mask;
pub mod remote;
pub mod render;
pub mod signup;
pub mod transform;

pub use config::{EditorConfig, SignupConfig};
pub use decode::{DecodeError, PixelBuffer};
pub use editor::{Action, Command, Editor, EditorError, EditorState, Outcome, SavedImage};
pub use encode::EncodeError;
pub use filters::{FilterError, FilterKind, FilterVector};
pub use keyboard::{shortcut_for, Shortcut};
pub use remote::{BackgroundRemover, RemoveBgError};
pub use signup::{SignupError, SignupForm, SignupSubmitter};
pub use transform::{CropTool, InterpolationFilter, Point, TransformState};
