use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::consts::{
    BLEND_FOREGROUND_WEIGHT, CURSOR_RING_COLOR, CURSOR_RING_THICKNESS,
    DEFINITE_BACKGROUND_COLOR, DEFINITE_FOREGROUND_COLOR, OVERLAY_OPACITY,
    PROBABLE_BACKGROUND_COLOR, PROBABLE_FOREGROUND_COLOR,
};
use crate::mask::{Label, LabelMask};
use crate::overlay::BrushOverlay;
use crate::viewport::Viewport;

/// How the committed mask is composed with the source image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    /// Masked image at 75% over the raw crop at 25%: foreground pops,
    /// background dims instead of disappearing.
    #[default]
    Blend,
    /// Raw image crop, no mask coloring.
    Image,
    /// Image crop with background pixels zeroed.
    MaskedImage,
    /// Binary view of the mask: foreground white, background black.
    Mask,
}

/// Brush footprint preview, drawn last as a ring.
#[derive(Clone, Copy, Debug)]
pub struct BrushCursor {
    /// Position in screen coordinates of the display buffer.
    pub screen: (f32, f32),
    /// Radius in image pixels; scaled to screen size by the viewport.
    pub radius: f32,
}

fn overlay_color(label: Label) -> [u8; 3] {
    match label {
        Label::DefiniteForeground => DEFINITE_FOREGROUND_COLOR,
        Label::ProbableForeground => PROBABLE_FOREGROUND_COLOR,
        Label::DefiniteBackground => DEFINITE_BACKGROUND_COLOR,
        Label::ProbableBackground => PROBABLE_BACKGROUND_COLOR,
    }
}

fn mix(a: [u8; 3], b: [u8; 3], weight_a: f32) -> [u8; 3] {
    let wb = 1.0 - weight_a;
    [
        (a[0] as f32 * weight_a + b[0] as f32 * wb) as u8,
        (a[1] as f32 * weight_a + b[1] as f32 * wb) as u8,
        (a[2] as f32 * weight_a + b[2] as f32 * wb) as u8,
    ]
}

/// Render the current viewport crop of mask + overlay + image into a
/// display-sized buffer.
///
/// The crop is resized by the viewport scale with nearest-neighbor sampling
/// so labels do not blur at label boundaries. Pending overlay cells are
/// tinted on top at 50% opacity in every mode.
pub fn render(
    image: &RgbImage,
    mask: &LabelMask,
    overlay: &BrushOverlay,
    viewport: &Viewport,
    mode: ViewMode,
    cursor: Option<BrushCursor>,
) -> RgbImage {
    let scale = viewport.scale();
    let view = viewport.view;
    let img_w = mask.width();
    let img_h = mask.height();

    let out_w = ((view.width * scale).round() as u32).max(1);
    let out_h = ((view.height * scale).round() as u32).max(1);
    let mut out = RgbImage::new(out_w, out_h);

    for oy in 0..out_h {
        for ox in 0..out_w {
            // Nearest-neighbor: sample the pixel under the output center.
            let ix = (view.x + (ox as f32 + 0.5) / scale).floor();
            let iy = (view.y + (oy as f32 + 0.5) / scale).floor();
            let col = (ix.max(0.0) as usize).min(img_w - 1);
            let row = (iy.max(0.0) as usize).min(img_h - 1);

            let src = image.get_pixel(col as u32, row as u32).0;
            let label = mask.data[[row, col]];

            let mut rgb = match mode {
                ViewMode::Image => src,
                ViewMode::Mask => {
                    if label.is_foreground() {
                        [255, 255, 255]
                    } else {
                        [0, 0, 0]
                    }
                }
                ViewMode::MaskedImage => {
                    if label.is_foreground() {
                        src
                    } else {
                        [0, 0, 0]
                    }
                }
                ViewMode::Blend => {
                    let masked = if label.is_foreground() { src } else { [0, 0, 0] };
                    mix(masked, src, BLEND_FOREGROUND_WEIGHT)
                }
            };

            if let Some(pending) = overlay.data[[row, col]] {
                rgb = mix(overlay_color(pending), rgb, OVERLAY_OPACITY);
            }

            out.put_pixel(ox, oy, Rgb(rgb));
        }
    }

    if let Some(cursor) = cursor {
        draw_cursor_ring(&mut out, cursor, scale);
    }

    out
}

/// Ring of radius `cursor.radius * scale` around the pointer.
fn draw_cursor_ring(out: &mut RgbImage, cursor: BrushCursor, scale: f32) {
    let (cx, cy) = cursor.screen;
    let r = cursor.radius * scale;
    if r <= 0.0 {
        return;
    }

    let x_min = ((cx - r - 1.0).floor().max(0.0)) as u32;
    let y_min = ((cy - r - 1.0).floor().max(0.0)) as u32;
    let x_max = (((cx + r + 1.0).ceil()) as i64).clamp(0, out.width() as i64 - 1) as u32;
    let y_max = (((cy + r + 1.0).ceil()) as i64).clamp(0, out.height() as i64 - 1) as u32;

    if cx + r < 0.0 || cy + r < 0.0 {
        return;
    }

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            let d = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
            if (d - r).abs() <= CURSOR_RING_THICKNESS {
                out.put_pixel(x, y, Rgb(CURSOR_RING_COLOR));
            }
        }
    }
}
