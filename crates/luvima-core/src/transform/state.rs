//! Rotation and flip state.

use serde::{Deserialize, Serialize};

/// Quarter-turn rotation plus independent flips.
///
/// `rotation` accumulates without bound (four rotate-rights give 360, not
/// 0); rendering reads [`TransformState::normalized_rotation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformState {
    /// Accumulated rotation in degrees, positive = clockwise on screen.
    pub rotation: i64,
    /// Mirror across the vertical axis.
    pub flip_horizontal: bool,
    /// Mirror across the horizontal axis.
    pub flip_vertical: bool,
}

impl TransformState {
    /// Degrees added or removed by one rotate action.
    pub const QUARTER_TURN: i64 = 90;

    /// Create the identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rotate_left(self) -> Self {
        Self {
            rotation: self.rotation - Self::QUARTER_TURN,
            ..self
        }
    }

    #[must_use]
    pub fn rotate_right(self) -> Self {
        Self {
            rotation: self.rotation + Self::QUARTER_TURN,
            ..self
        }
    }

    #[must_use]
    pub fn toggle_flip_horizontal(self) -> Self {
        Self {
            flip_horizontal: !self.flip_horizontal,
            ..self
        }
    }

    #[must_use]
    pub fn toggle_flip_vertical(self) -> Self {
        Self {
            flip_vertical: !self.flip_vertical,
            ..self
        }
    }

    /// Rotation wrapped into `0..360`.
    pub fn normalized_rotation(&self) -> i64 {
        self.rotation.rem_euclid(360)
    }

    /// Check if drawing with this transform leaves the image as-is.
    pub fn is_identity(&self) -> bool {
        self.normalized_rotation() == 0 && !self.flip_horizontal && !self.flip_vertical
    }
}
