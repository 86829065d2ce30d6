/// Minimum pixel count (h*w) to use row-level Rayon parallelism in morphology.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Default structuring radius for the trimap border bands. Must be large
/// enough that the bands do not degenerate on typical stroke widths.
pub const DEFAULT_STRUCTURING_RADIUS: usize = 15;

/// Default brush radius in image pixels.
pub const DEFAULT_BRUSH_RADIUS: i32 = 5;

/// Brush radius floor. Radius adjustments never go below this.
pub const MIN_BRUSH_RADIUS: i32 = 1;

/// Zoom rate applied per vertical drag step. Values < 1 zoom in.
pub const DEFAULT_ZOOM_RATE: f32 = 0.99;

/// Default display window size in pixels.
pub const DEFAULT_DISPLAY_WIDTH: u32 = 1000;
pub const DEFAULT_DISPLAY_HEIGHT: u32 = 720;

/// Opacity of uncommitted brush-overlay cells in the composited view.
pub const OVERLAY_OPACITY: f32 = 0.5;

/// Weight of the masked image in Blend mode; the raw crop gets the rest.
pub const BLEND_FOREGROUND_WEIGHT: f32 = 0.75;

/// Overlay tint per label (RGB).
pub const DEFINITE_FOREGROUND_COLOR: [u8; 3] = [255, 0, 0];
pub const PROBABLE_FOREGROUND_COLOR: [u8; 3] = [255, 130, 230];
pub const DEFINITE_BACKGROUND_COLOR: [u8; 3] = [0, 130, 255];
pub const PROBABLE_BACKGROUND_COLOR: [u8; 3] = [160, 255, 255];

/// Brush footprint preview ring.
pub const CURSOR_RING_COLOR: [u8; 3] = [0, 255, 0];

/// Half-thickness of the cursor ring in display pixels.
pub const CURSOR_RING_THICKNESS: f32 = 0.75;

/// Variance floor for the color-model oracle, avoids division by zero on
/// single-color regions.
pub const COLOR_VARIANCE_FLOOR: f64 = 1e-4;
