//! Keyboard shortcuts.

use serde::{Deserialize, Serialize};

/// Editor actions bound to Ctrl (or Cmd) + key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shortcut {
    /// Ctrl/Cmd+O
    Open,
    /// Ctrl/Cmd+S
    Save,
    /// Ctrl/Cmd+Z. Resets all edits, it is not an undo.
    Reset,
}

impl Shortcut {
    pub fn name(self) -> &'static str {
        match self {
            Shortcut::Open => "open",
            Shortcut::Save => "save",
            Shortcut::Reset => "reset",
        }
    }
}

/// Map a key press to a shortcut.
///
/// `key` is the `KeyboardEvent.key` value; `ctrl` and `meta` are the
/// modifier flags. Either modifier works so the bindings match on macOS.
/// Only lowercase keys match, so Shift chords such as Ctrl+Shift+Z stay
/// unbound.
pub fn shortcut_for(key: &str, ctrl: bool, meta: bool) -> Option<Shortcut> {
    if !(ctrl || meta) {
        return None;
    }

    match key {
        "o" => Some(Shortcut::Open),
        "s" => Some(Shortcut::Save),
        "z" => Some(Shortcut::Reset),
        _ => None,
    }
}
