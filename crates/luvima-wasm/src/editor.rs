//! Image editor WASM bindings.
//!
//! `JsEditor` wraps the core [`Editor`] for the page script. The page
//! forwards DOM events (slider input, buttons, pointer events on the
//! canvas, key presses, file picks) and redraws from [`JsEditor::render`].
//!
//! # Example
//!
//! ```typescript
//! const editor = new JsEditor();
//! editor.load(bytes, file.type);
//!
//! canvas.onmousedown = (e) => editor.pointer_down(e.offsetX, e.offsetY);
//! canvas.onmousemove = (e) => { editor.pointer_move(e.offsetX, e.offsetY); redraw(); };
//! canvas.onmouseup = (e) => { editor.pointer_up(e.offsetX, e.offsetY); redraw(); };
//!
//! document.onkeydown = (e) => {
//!   const shortcut = editor.handle_key(e.key, e.ctrlKey, e.metaKey);
//!   if (shortcut) e.preventDefault();
//!   if (shortcut === 'open') fileInput.click();
//! };
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use luvima_core::editor::{Action, Command, Editor};
use luvima_core::{shortcut_for, BackgroundRemover, EditorConfig, FilterKind, Point};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::download::trigger_download;
use crate::remote::FetchRemover;
use crate::types::JsPixelBuffer;
use crate::{options_or_default, to_js_error};

fn parse_filter(name: &str) -> Result<FilterKind, JsValue> {
    FilterKind::from_str(name).map_err(to_js_error)
}

/// The image editor.
#[wasm_bindgen]
pub struct JsEditor {
    inner: Rc<RefCell<Editor>>,
}

#[wasm_bindgen]
impl JsEditor {
    /// Create an editor.
    ///
    /// # Arguments
    /// * `config` - Optional options object; missing fields use defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsEditor, JsValue> {
        let config: EditorConfig = options_or_default(config)?;
        Ok(JsEditor {
            inner: Rc::new(RefCell::new(Editor::new(config))),
        })
    }

    /// Load an image file.
    ///
    /// # Errors
    /// Returns "Please select a valid image file" when `mime_type` is not an
    /// image type, or the decode error. The current image is kept on error.
    pub fn load(&self, bytes: &[u8], mime_type: &str) -> Result<(), JsValue> {
        self.inner
            .borrow_mut()
            .load(bytes, mime_type)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.borrow().has_image()
    }

    /// Bind the slider to the filter called `name`.
    pub fn select_filter(&self, name: &str) -> Result<(), JsValue> {
        let kind = parse_filter(name)?;
        self.edit(Action::SelectFilter(kind)).map(|_| ())
    }

    /// Name of the filter the slider controls.
    #[wasm_bindgen(getter)]
    pub fn selected_filter(&self) -> String {
        self.inner.borrow().state().selected.name().to_string()
    }

    /// Set a filter value. Returns whether the output changed.
    pub fn set_filter(&self, name: &str, value: f32) -> Result<bool, JsValue> {
        let kind = parse_filter(name)?;
        self.edit(Action::SetFilter(kind, value))
    }

    /// Set the selected filter's value from the slider.
    pub fn set_selected_value(&self, value: f32) -> Result<bool, JsValue> {
        let kind = self.inner.borrow().state().selected;
        self.edit(Action::SetFilter(kind, value))
    }

    pub fn filter_value(&self, name: &str) -> Result<f32, JsValue> {
        let kind = parse_filter(name)?;
        Ok(self.inner.borrow().state().filters.get(kind))
    }

    /// Slider bounds for a filter as `{ min, max, step }`.
    pub fn filter_range(name: &str) -> Result<JsValue, JsValue> {
        let range = parse_filter(name)?.range();
        serde_wasm_bindgen::to_value(&range).map_err(to_js_error)
    }

    /// Display text for the slider, e.g. "Blur: 2.5px".
    pub fn filter_display(name: &str, value: f32) -> Result<String, JsValue> {
        let kind = parse_filter(name)?;
        Ok(format!("{}: {}", kind.label(), kind.format_value(value)))
    }

    pub fn rotate_left(&self) -> Result<bool, JsValue> {
        self.edit(Action::RotateLeft)
    }

    pub fn rotate_right(&self) -> Result<bool, JsValue> {
        self.edit(Action::RotateRight)
    }

    pub fn flip_horizontal(&self) -> Result<bool, JsValue> {
        self.edit(Action::FlipHorizontal)
    }

    pub fn flip_vertical(&self) -> Result<bool, JsValue> {
        self.edit(Action::FlipVertical)
    }

    /// Arm or cancel the crop tool. Returns whether it is now active.
    pub fn toggle_crop(&self) -> Result<bool, JsValue> {
        self.edit(Action::ToggleCrop)?;
        Ok(self.crop_active())
    }

    #[wasm_bindgen(getter)]
    pub fn crop_active(&self) -> bool {
        self.inner.borrow().state().crop_tool.is_active()
    }

    pub fn pointer_down(&self, x: f64, y: f64) -> Result<(), JsValue> {
        self.edit(Action::PointerDown(Point::new(x, y))).map(|_| ())
    }

    pub fn pointer_move(&self, x: f64, y: f64) -> Result<(), JsValue> {
        self.edit(Action::PointerMove(Point::new(x, y))).map(|_| ())
    }

    /// Finish a crop drag. Returns whether a crop was applied.
    pub fn pointer_up(&self, x: f64, y: f64) -> Result<bool, JsValue> {
        self.edit(Action::PointerUp(Point::new(x, y)))
    }

    /// Restore default filters, identity transform and no crop.
    pub fn reset(&self) -> Result<bool, JsValue> {
        self.edit(Action::Reset)
    }

    pub fn undo(&self) -> bool {
        self.inner.borrow_mut().undo()
    }

    pub fn redo(&self) -> bool {
        self.inner.borrow_mut().redo()
    }

    /// Render the editing surface, including the crop outline while dragging.
    pub fn render(&self) -> Result<JsPixelBuffer, JsValue> {
        self.inner
            .borrow()
            .render_preview()
            .map(JsPixelBuffer::from)
            .map_err(to_js_error)
    }

    /// Render what Save would export.
    pub fn render_export(&self) -> Result<JsPixelBuffer, JsValue> {
        self.inner
            .borrow()
            .render()
            .map(JsPixelBuffer::from)
            .map_err(to_js_error)
    }

    /// The filter chain as a CSS `filter` value.
    pub fn css_filter(&self) -> String {
        self.inner.borrow().css_filter()
    }

    /// Snapshot of the editor state as a plain object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.borrow().state()).map_err(to_js_error)
    }

    /// Export a PNG and download it. Returns the file name.
    pub fn save(&self) -> Result<String, JsValue> {
        let timestamp = js_sys::Date::now() as u64;
        let saved = self.inner.borrow().save(timestamp).map_err(to_js_error)?;
        trigger_download(&saved.bytes, &saved.file_name, "image/png").map_err(to_js_error)?;
        Ok(saved.file_name)
    }

    /// Handle a key press.
    ///
    /// Returns the shortcut name ("open", "save" or "reset") when the key is
    /// bound, so the page can prevent the browser default. Save and reset
    /// are performed here; "open" is left to the page's file input.
    pub fn handle_key(&self, key: &str, ctrl: bool, meta: bool) -> Result<Option<String>, JsValue> {
        let Some(shortcut) = shortcut_for(key, ctrl, meta) else {
            return Ok(None);
        };

        match Command::from(shortcut) {
            Command::Save => {
                if self.has_image() {
                    self.save()?;
                }
            }
            command => {
                self.inner
                    .borrow_mut()
                    .dispatch(command)
                    .map_err(to_js_error)?;
            }
        }

        Ok(Some(shortcut.name().to_string()))
    }

    /// Send the export render to the configured endpoint and replace the
    /// image with the response.
    ///
    /// The promise rejects with "Error removing background: ..." on failure,
    /// leaving the current image in place.
    pub fn remove_background(&self) -> js_sys::Promise {
        let editor = Rc::clone(&self.inner);

        future_to_promise(async move {
            let (png, endpoint) = {
                let editor = editor.borrow();
                let png = editor.prepare_background_removal().map_err(to_js_error)?;
                (png, editor.config().remove_bg_endpoint.clone())
            };

            let result = FetchRemover::new(endpoint).remove_background(png).await;

            editor
                .borrow_mut()
                .finish_background_removal(result)
                .map_err(to_js_error)?;
            Ok(JsValue::UNDEFINED)
        })
    }
}

impl JsEditor {
    fn edit(&self, action: Action) -> Result<bool, JsValue> {
        self.inner.borrow_mut().apply(&action).map_err(to_js_error)
    }
}
