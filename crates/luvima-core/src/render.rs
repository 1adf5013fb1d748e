//! Projection of editor state onto pixels.
//!
//! Rendering is a pure function of the source image, the state snapshot
//! and the configuration. Running it twice on the same inputs gives the
//! same buffer, and every stage starts from a fresh surface.

use image::Rgba;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::config::EditorConfig;
use crate::decode::PixelBuffer;
use crate::editor::EditorState;
use crate::filters::apply_filters;
use crate::mask::apply_corner_mask;
use crate::transform::{apply_crops, draw_transformed, fit_surface, CropRect};

/// Color of the live crop outline.
pub const CROP_OUTLINE_COLOR: [u8; 4] = [255, 0, 0, 255];

/// Size of the surface `source` is drawn onto, before any crop.
pub fn surface_size(source: &PixelBuffer, config: &EditorConfig) -> (u32, u32) {
    fit_surface(
        source.width,
        source.height,
        config.max_surface_width,
        config.max_surface_height,
    )
}

/// Render the export output for `state`.
///
/// # Pipeline
///
/// 1. Fit the source to the configured maximum surface
/// 2. Draw under rotation and flips
/// 3. Filter chain
/// 4. Committed crops, oldest first
/// 5. Corner mask
pub fn render(source: &PixelBuffer, state: &EditorState, config: &EditorConfig) -> PixelBuffer {
    let (width, height) = surface_size(source, config);

    let mut surface = draw_transformed(
        source,
        &state.transform,
        width,
        height,
        config.interpolation,
    );
    apply_filters(&mut surface, &state.filters);

    let mut output = apply_crops(surface, &state.crops);
    apply_corner_mask(&mut output, state.filters.border_radius);

    output
}

/// Render what the editing surface shows: the export output plus the crop
/// outline while a crop is being dragged.
pub fn render_preview(
    source: &PixelBuffer,
    state: &EditorState,
    config: &EditorConfig,
) -> PixelBuffer {
    let output = render(source, state, config);

    match state.crop_tool.outline() {
        Some(rect) => draw_crop_outline(output, &rect),
        None => output,
    }
}

/// Stroke a 2-pixel outline centered on the edges of `rect`.
///
/// The outline is clipped to `buffer`; a rectangle entirely off the buffer
/// draws nothing.
pub fn draw_crop_outline(buffer: PixelBuffer, rect: &CropRect) -> PixelBuffer {
    let Some(region) = rect.to_pixels().clamp_to(buffer.width, buffer.height) else {
        return buffer;
    };
    let Some(mut canvas) = buffer.to_rgba_image() else {
        return buffer;
    };

    let x = i32::try_from(region.x).unwrap_or(i32::MAX);
    let y = i32::try_from(region.y).unwrap_or(i32::MAX);
    let color = Rgba(CROP_OUTLINE_COLOR);

    let outer = Rect::at(x.saturating_sub(1), y.saturating_sub(1))
        .of_size(region.width.saturating_add(2), region.height.saturating_add(2));
    draw_hollow_rect_mut(&mut canvas, outer, color);
    draw_hollow_rect_mut(&mut canvas, Rect::at(x, y).of_size(region.width, region.height), color);

    PixelBuffer::from_rgba_image(canvas)
}
