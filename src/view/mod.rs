//! View layer
//!
//! The editing surface controller and the highlight overlay stacked above it.
//! Both work in the pixel space of a monospace plain-text surface described
//! by [`FontMetrics`].

pub mod overlay;
pub mod surface;

use crate::config::EditorConfig;

/// Geometry shared by the editing surface and the overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub line_height: f32,
    pub char_width: f32,
    pub padding_top: f32,
    pub padding_left: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

impl From<&EditorConfig> for FontMetrics {
    fn from(config: &EditorConfig) -> Self {
        Self {
            line_height: config.line_height,
            char_width: config.char_width,
            padding_top: config.padding_top,
            padding_left: config.padding_left,
        }
    }
}
