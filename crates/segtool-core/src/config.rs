use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compositor::ViewMode;
use crate::consts::{
    DEFAULT_BRUSH_RADIUS, DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH,
    DEFAULT_STRUCTURING_RADIUS, DEFAULT_ZOOM_RATE,
};
use crate::error::Result;

/// Session defaults, loadable from a TOML file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Structuring radius for the trimap border bands.
    #[serde(default = "default_structuring_radius")]
    pub structuring_radius: usize,
    /// Initial brush radius in image pixels.
    #[serde(default = "default_brush_radius")]
    pub brush_radius: i32,
    /// Zoom rate per vertical drag step (< 1 zooms in).
    #[serde(default = "default_zoom_rate")]
    pub zoom_rate: f32,
    /// Display window size in pixels.
    #[serde(default = "default_display_width")]
    pub display_width: u32,
    #[serde(default = "default_display_height")]
    pub display_height: u32,
    /// Initial view mode.
    #[serde(default)]
    pub view_mode: ViewMode,
}

fn default_structuring_radius() -> usize {
    DEFAULT_STRUCTURING_RADIUS
}
fn default_brush_radius() -> i32 {
    DEFAULT_BRUSH_RADIUS
}
fn default_zoom_rate() -> f32 {
    DEFAULT_ZOOM_RATE
}
fn default_display_width() -> u32 {
    DEFAULT_DISPLAY_WIDTH
}
fn default_display_height() -> u32 {
    DEFAULT_DISPLAY_HEIGHT
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            structuring_radius: DEFAULT_STRUCTURING_RADIUS,
            brush_radius: DEFAULT_BRUSH_RADIUS,
            zoom_rate: DEFAULT_ZOOM_RATE,
            display_width: DEFAULT_DISPLAY_WIDTH,
            display_height: DEFAULT_DISPLAY_HEIGHT,
            view_mode: ViewMode::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }
}
