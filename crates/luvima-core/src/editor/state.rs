//! Editor state snapshots and the reducer that advances them.

use serde::{Deserialize, Serialize};

use crate::filters::{FilterError, FilterKind, FilterVector};
use crate::transform::{CropRelease, CropTool, PixelRect, Point, TransformState};

/// Smallest crop extent used by [`EditorState::apply`].
pub const DEFAULT_MIN_CROP_EXTENT: f64 = 10.0;

/// A user edit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Action {
    /// Choose which filter the slider controls.
    SelectFilter(FilterKind),
    /// Set a filter value; out-of-range values are rejected.
    SetFilter(FilterKind, f32),
    RotateLeft,
    RotateRight,
    FlipHorizontal,
    FlipVertical,
    /// Arm or cancel the crop tool.
    ToggleCrop,
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    /// Back to defaults. Not an undo.
    Reset,
}

/// One immutable snapshot of everything the user has edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    pub filters: FilterVector,
    pub transform: TransformState,
    /// Committed crops, each relative to the surface left by the previous.
    pub crops: Vec<PixelRect>,
    pub crop_tool: CropTool,
    /// Filter the slider is bound to.
    pub selected: FilterKind,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            filters: FilterVector::default(),
            transform: TransformState::default(),
            crops: Vec::new(),
            crop_tool: CropTool::Idle,
            selected: FilterKind::Brightness,
        }
    }
}

impl EditorState {
    /// Apply `action`, returning the next state.
    ///
    /// # Errors
    ///
    /// Returns `FilterError` when a `SetFilter` value is out of range or not
    /// finite. `self` is unchanged either way.
    pub fn apply(&self, action: &Action) -> Result<Self, FilterError> {
        self.apply_with(action, DEFAULT_MIN_CROP_EXTENT)
    }

    /// Like [`EditorState::apply`], with an explicit minimum crop extent.
    pub fn apply_with(&self, action: &Action, min_crop_extent: f64) -> Result<Self, FilterError> {
        let mut next = self.clone();

        match *action {
            Action::SelectFilter(kind) => next.selected = kind,
            Action::SetFilter(kind, value) => next.filters.set(kind, value)?,
            Action::RotateLeft => next.transform = self.transform.rotate_left(),
            Action::RotateRight => next.transform = self.transform.rotate_right(),
            Action::FlipHorizontal => next.transform = self.transform.toggle_flip_horizontal(),
            Action::FlipVertical => next.transform = self.transform.toggle_flip_vertical(),
            Action::ToggleCrop => next.crop_tool = self.crop_tool.toggle(),
            Action::PointerDown(p) => next.crop_tool = self.crop_tool.pointer_down(p),
            Action::PointerMove(p) => next.crop_tool = self.crop_tool.pointer_move(p),
            Action::PointerUp(p) => {
                let (tool, release) = self.crop_tool.pointer_up(p, min_crop_extent);
                next.crop_tool = tool;
                match release {
                    CropRelease::Apply(rect) => {
                        log::debug!("crop applied: {rect:?}");
                        next.crops.push(rect.to_pixels());
                    }
                    CropRelease::TooSmall => log::debug!("crop below minimum extent ignored"),
                    CropRelease::Ignored => {}
                }
            }
            Action::Reset => next = Self::default(),
        }

        Ok(next)
    }

    /// Check if `other` differs in what gets rendered to the export output.
    pub fn differs_in_output(&self, other: &Self) -> bool {
        self.filters != other.filters
            || self.transform != other.transform
            || self.crops != other.crops
    }

    /// Value of the selected filter.
    pub fn selected_value(&self) -> f32 {
        self.filters.get(self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(actions: &[Action]) -> EditorState {
        actions
            .iter()
            .fold(EditorState::default(), |s, a| s.apply(a).unwrap())
    }

    #[test]
    fn test_default_state() {
        let state = EditorState::default();
        assert!(state.filters.is_default());
        assert!(state.transform.is_identity());
        assert!(state.crops.is_empty());
        assert_eq!(state.crop_tool, CropTool::Idle);
        assert_eq!(state.selected, FilterKind::Brightness);
        assert_eq!(state.selected_value(), 100.0);
    }

    #[test]
    fn test_set_filter() {
        let state = run(&[Action::SetFilter(FilterKind::Blur, 2.5)]);
        assert_eq!(state.filters.blur, 2.5);
    }

    #[test]
    fn test_set_filter_out_of_range_leaves_state() {
        let state = EditorState::default();
        let err = state
            .apply(&Action::SetFilter(FilterKind::Contrast, 201.0))
            .unwrap_err();
        assert!(matches!(err, FilterError::OutOfRange { .. }));
        assert!(state.filters.is_default());
    }

    #[test]
    fn test_select_filter() {
        let state = run(&[
            Action::SetFilter(FilterKind::Sepia, 40.0),
            Action::SelectFilter(FilterKind::Sepia),
        ]);
        assert_eq!(state.selected, FilterKind::Sepia);
        assert_eq!(state.selected_value(), 40.0);
    }

    #[test]
    fn test_rotations_accumulate() {
        let state = run(&[
            Action::RotateRight,
            Action::RotateRight,
            Action::RotateLeft,
            Action::RotateRight,
        ]);
        assert_eq!(state.transform.rotation, 180);
    }

    #[test]
    fn test_flips() {
        let state = run(&[Action::FlipHorizontal, Action::FlipVertical, Action::FlipHorizontal]);
        assert!(!state.transform.flip_horizontal);
        assert!(state.transform.flip_vertical);
    }

    #[test]
    fn test_crop_commits_and_returns_to_idle() {
        let state = run(&[
            Action::ToggleCrop,
            Action::PointerDown(Point::new(10.0, 10.0)),
            Action::PointerMove(Point::new(50.0, 30.0)),
            Action::PointerUp(Point::new(110.0, 60.0)),
        ]);
        assert_eq!(
            state.crops,
            vec![PixelRect {
                x: 10,
                y: 10,
                width: 100,
                height: 50
            }]
        );
        assert_eq!(state.crop_tool, CropTool::Idle);
    }

    #[test]
    fn test_small_crop_ignored_and_rearmed() {
        let state = run(&[
            Action::ToggleCrop,
            Action::PointerDown(Point::new(10.0, 10.0)),
            Action::PointerUp(Point::new(19.0, 100.0)),
        ]);
        assert!(state.crops.is_empty());
        assert_eq!(state.crop_tool, CropTool::Armed);
    }

    #[test]
    fn test_explicit_min_crop_extent() {
        let state = run(&[Action::ToggleCrop, Action::PointerDown(Point::new(0.0, 0.0))]);
        let next = state
            .apply_with(&Action::PointerUp(Point::new(15.0, 15.0)), 20.0)
            .unwrap();
        assert!(next.crops.is_empty());
    }

    #[test]
    fn test_pointer_without_crop_mode_is_ignored() {
        let state = run(&[
            Action::PointerDown(Point::new(0.0, 0.0)),
            Action::PointerUp(Point::new(100.0, 100.0)),
        ]);
        assert_eq!(state, EditorState::default());
    }

    #[test]
    fn test_reset() {
        let state = run(&[
            Action::SetFilter(FilterKind::Grayscale, 100.0),
            Action::SelectFilter(FilterKind::Grayscale),
            Action::RotateLeft,
            Action::FlipVertical,
            Action::ToggleCrop,
            Action::PointerDown(Point::new(0.0, 0.0)),
            Action::PointerUp(Point::new(50.0, 50.0)),
            Action::ToggleCrop,
            Action::Reset,
        ]);
        assert_eq!(state, EditorState::default());
    }

    #[test]
    fn test_differs_in_output() {
        let a = EditorState::default();
        let b = a.apply(&Action::SelectFilter(FilterKind::Blur)).unwrap();
        assert!(!a.differs_in_output(&b));

        let c = a.apply(&Action::RotateRight).unwrap();
        assert!(a.differs_in_output(&c));
    }
}
