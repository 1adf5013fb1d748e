//! The image editor.
//!
//! [`Editor`] owns the decoded source image, the current [`EditorState`]
//! snapshot and the undo history. Edits go through the pure reducer on
//! [`EditorState`]; pixels come from [`crate::render`], which is a pure
//! projection of source, state and config.
//!
//! Background removal is split in two halves around the network call so a
//! shared editor never has to stay borrowed while the request is pending:
//!
//! ```ignore
//! let png = editor.borrow().prepare_background_removal()?;
//! let result = remover.remove_background(png).await;
//! editor.borrow_mut().finish_background_removal(result)?;
//! ```

mod history;
mod state;

pub use history::History;
pub use state::{Action, EditorState, DEFAULT_MIN_CROP_EXTENT};

use thiserror::Error;

use crate::config::EditorConfig;
use crate::decode::{decode_file, decode_image, is_image_type, DecodeError, PixelBuffer};
use crate::encode::{current_timestamp_ms, encode_png, export_file_name, EncodeError};
use crate::filters::FilterError;
use crate::keyboard::Shortcut;
use crate::remote::{BackgroundRemover, RemoveBgError};
use crate::render;

/// Errors surfaced by editor operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The chosen file is not declared as an image.
    #[error("Please select a valid image file")]
    NotAnImage { mime_type: String },

    /// An operation needs an image and none is loaded.
    #[error("No image loaded")]
    NoImage,

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("Error removing background: {0}")]
    RemoveBg(#[from] RemoveBgError),
}

/// A UI intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Apply an edit.
    Edit(Action),
    Undo,
    Redo,
    /// Ask the host to show the file picker.
    Open,
    /// Export the current render.
    Save,
}

impl From<Shortcut> for Command {
    fn from(shortcut: Shortcut) -> Self {
        match shortcut {
            Shortcut::Open => Command::Open,
            Shortcut::Save => Command::Save,
            Shortcut::Reset => Command::Edit(Action::Reset),
        }
    }
}

/// What dispatching a command did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// State was (possibly) updated; `changed` is false for no-ops.
    Updated { changed: bool },
    /// The host should open its file picker.
    OpenFilePicker,
    /// An export is ready to download.
    Saved(SavedImage),
}

/// An encoded export and the file name to save it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Editing session for one image at a time.
#[derive(Debug, Clone)]
pub struct Editor {
    config: EditorConfig,
    source: Option<PixelBuffer>,
    state: EditorState,
    history: History,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let history = History::new(config.history_limit);
        Self {
            config,
            source: None,
            state: EditorState::default(),
            history,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn source(&self) -> Option<&PixelBuffer> {
        self.source.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Decode a user-chosen file and make it the source image.
    ///
    /// Filters and transform carry over to the new image; committed crops,
    /// the crop tool and the undo history do not.
    ///
    /// # Arguments
    ///
    /// * `bytes` - File contents
    /// * `mime_type` - Declared type of the file, e.g. `image/png`
    ///
    /// # Errors
    ///
    /// `NotAnImage` when `mime_type` is not an image type, or `Decode` when
    /// the bytes cannot be decoded. The editor is unchanged on error.
    pub fn load(&mut self, bytes: &[u8], mime_type: &str) -> Result<(), EditorError> {
        if !is_image_type(mime_type) {
            log::warn!("rejected file of type {mime_type:?}");
            return Err(EditorError::NotAnImage {
                mime_type: mime_type.to_string(),
            });
        }

        let image = decode_file(bytes, mime_type)?;
        log::info!("loaded {}x{} image ({mime_type})", image.width, image.height);
        self.load_buffer(image);
        Ok(())
    }

    /// Make an already decoded buffer the source image.
    pub fn load_buffer(&mut self, image: PixelBuffer) {
        self.source = Some(image);
        self.state.crops.clear();
        self.state.crop_tool = Default::default();
        self.history.clear();
    }

    /// Apply an edit.
    ///
    /// Returns whether the export output changed. Only such edits are
    /// recorded for undo; selecting a filter or moving the crop pointer is
    /// not.
    pub fn apply(&mut self, action: &Action) -> Result<bool, EditorError> {
        let next = self.state.apply_with(action, self.config.min_crop_extent)?;
        let changed = next.differs_in_output(&self.state);

        if changed {
            log::debug!("{action:?}");
            let previous = std::mem::replace(&mut self.state, next);
            self.history.record(previous);
        } else {
            self.state = next;
        }

        Ok(changed)
    }

    /// Restore the default filters, identity transform and no crop.
    pub fn reset(&mut self) -> Result<bool, EditorError> {
        self.apply(&Action::Reset)
    }

    /// Step back one edit. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.state) {
            Some(previous) => {
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    /// Step forward one undone edit. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.state) {
            Some(next) => {
                self.restore(next);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, snapshot: EditorState) {
        let selected = self.state.selected;
        self.state = EditorState {
            crop_tool: Default::default(),
            selected,
            ..snapshot
        };
    }

    /// Run a UI intent.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, EditorError> {
        match command {
            Command::Edit(action) => {
                let changed = self.apply(&action)?;
                Ok(Outcome::Updated { changed })
            }
            Command::Undo => Ok(Outcome::Updated {
                changed: self.undo(),
            }),
            Command::Redo => Ok(Outcome::Updated {
                changed: self.redo(),
            }),
            Command::Open => Ok(Outcome::OpenFilePicker),
            Command::Save => self.save(current_timestamp_ms()).map(Outcome::Saved),
        }
    }

    /// Render the export output.
    pub fn render(&self) -> Result<PixelBuffer, EditorError> {
        let source = self.source.as_ref().ok_or(EditorError::NoImage)?;
        Ok(render::render(source, &self.state, &self.config))
    }

    /// Render the editing surface, crop outline included.
    pub fn render_preview(&self) -> Result<PixelBuffer, EditorError> {
        let source = self.source.as_ref().ok_or(EditorError::NoImage)?;
        Ok(render::render_preview(source, &self.state, &self.config))
    }

    /// Size of the uncropped surface, if an image is loaded.
    pub fn surface_size(&self) -> Option<(u32, u32)> {
        self.source
            .as_ref()
            .map(|source| render::surface_size(source, &self.config))
    }

    /// The filter chain as a CSS `filter` value.
    pub fn css_filter(&self) -> String {
        self.state.filters.to_css_filter()
    }

    /// Encode the export output as PNG, named for `timestamp_ms`.
    pub fn save(&self, timestamp_ms: u64) -> Result<SavedImage, EditorError> {
        let output = self.render()?;
        let bytes = encode_png(&output)?;
        let file_name = export_file_name(&self.config.export_prefix, timestamp_ms);
        log::info!("exported {file_name} ({} bytes)", bytes.len());
        Ok(SavedImage { file_name, bytes })
    }

    /// Encode the export output for the background-removal request.
    pub fn prepare_background_removal(&self) -> Result<Vec<u8>, EditorError> {
        let output = self.render()?;
        Ok(encode_png(&output)?)
    }

    /// Take the result of a background-removal request.
    ///
    /// On success the returned image becomes the new source. It already has
    /// the previous filters, transform and crops baked in, so those reset
    /// to defaults. On failure nothing changes.
    pub fn finish_background_removal(
        &mut self,
        result: Result<Vec<u8>, RemoveBgError>,
    ) -> Result<(), EditorError> {
        let bytes = result.inspect_err(|e| log::warn!("background removal failed: {e}"))?;
        let image = decode_image(&bytes).map_err(RemoveBgError::from)?;

        log::info!(
            "background removed, new source {}x{}",
            image.width,
            image.height
        );
        let selected = self.state.selected;
        self.source = Some(image);
        self.state = EditorState {
            selected,
            ..EditorState::default()
        };
        self.history.clear();
        Ok(())
    }

    /// Run a full background-removal round trip through `remover`.
    pub async fn remove_background<R: BackgroundRemover>(
        &mut self,
        remover: &R,
    ) -> Result<(), EditorError> {
        let png = self.prepare_background_removal()?;
        let result = remover.remove_background(png).await;
        self.finish_background_removal(result)
    }
}
