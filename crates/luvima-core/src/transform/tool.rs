//! The interactive crop tool.
//!
//! ```text
//! Idle --toggle--> Armed --pointer_down--> Dragging --pointer_up--> Idle
//!   ^                ^                        |
//!   |                +------- too small ------+
//!   +------------- toggle (cancel) -----------+
//! ```

use serde::{Deserialize, Serialize};

use super::crop::{CropRect, Point};

/// Crop tool state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CropTool {
    /// Not cropping.
    #[default]
    Idle,
    /// Waiting for a pointer press.
    Armed,
    /// Pointer is held; `end` is the last reported position.
    Dragging { start: Point, end: Option<Point> },
}

/// What a pointer release did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CropRelease {
    /// The tool was not dragging.
    Ignored,
    /// The rectangle was below the minimum extent.
    TooSmall,
    /// Crop to this rectangle.
    Apply(CropRect),
}

impl CropTool {
    /// Arm an idle tool, or cancel an active one.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            CropTool::Idle => CropTool::Armed,
            CropTool::Armed | CropTool::Dragging { .. } => CropTool::Idle,
        }
    }

    #[must_use]
    pub fn pointer_down(self, p: Point) -> Self {
        match self {
            CropTool::Armed => CropTool::Dragging {
                start: p,
                end: None,
            },
            other => other,
        }
    }

    #[must_use]
    pub fn pointer_move(self, p: Point) -> Self {
        match self {
            CropTool::Dragging { start, .. } => CropTool::Dragging {
                start,
                end: Some(p),
            },
            other => other,
        }
    }

    /// Finish a drag at `p`.
    ///
    /// Rectangles with either extent below `min_extent` are dropped and the
    /// tool stays armed for another attempt.
    pub fn pointer_up(self, p: Point, min_extent: f64) -> (Self, CropRelease) {
        match self {
            CropTool::Dragging { start, .. } => {
                let rect = CropRect::from_points(start, p);
                if rect.meets_minimum(min_extent) {
                    (CropTool::Idle, CropRelease::Apply(rect))
                } else {
                    (CropTool::Armed, CropRelease::TooSmall)
                }
            }
            other => (other, CropRelease::Ignored),
        }
    }

    /// The rectangle to outline in the preview, while dragging.
    pub fn outline(&self) -> Option<CropRect> {
        match self {
            CropTool::Dragging {
                start,
                end: Some(end),
            } => Some(CropRect::from_points(*start, *end)),
            _ => None,
        }
    }

    /// Check if the tool is armed or dragging.
    pub fn is_active(&self) -> bool {
        !matches!(self, CropTool::Idle)
    }
}
