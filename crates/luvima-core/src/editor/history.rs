//! Bounded undo/redo history of editor snapshots.

use std::collections::VecDeque;

use super::EditorState;

/// Undo and redo stacks with a fixed depth.
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<EditorState>,
    future: Vec<EditorState>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            limit,
        }
    }

    /// Record `previous` as the state to return to on undo.
    ///
    /// Clears the redo stack. The oldest entry is dropped past the limit.
    pub fn record(&mut self, previous: EditorState) {
        self.future.clear();
        if self.limit == 0 {
            return;
        }
        if self.past.len() == self.limit {
            self.past.pop_front();
        }
        self.past.push_back(previous);
    }

    /// Step back from `current`, returning the state to restore.
    pub fn undo(&mut self, current: &EditorState) -> Option<EditorState> {
        let previous = self.past.pop_back()?;
        self.future.push(current.clone());
        Some(previous)
    }

    /// Step forward from `current`, returning the state to restore.
    pub fn redo(&mut self, current: &EditorState) -> Option<EditorState> {
        let next = self.future.pop()?;
        self.past.push_back(current.clone());
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    /// Number of undo steps available.
    pub fn len(&self) -> usize {
        self.past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.past.is_empty()
    }
}
