pub mod scale;
pub mod writer;

use serde::{Deserialize, Serialize};

/// Vertical metrics and unit conversion constants of the generated font.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FontMetrics {
    /// Em size; 2048 by OpenType convention.
    pub total_height: u32,
    pub ascent: u32,
    /// Fraction of the ascent the tallest glyph box is scaled to.
    pub height_ratio: f64,
    /// potrace EPS output units per input pixel.
    pub pixel_multiplier: f64,
    /// Right side bearing added to every advance width.
    pub rbearing: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        FontMetrics {
            total_height: 2048,
            ascent: 1638,
            height_ratio: 0.9,
            pixel_multiplier: 10.0,
            rbearing: 150.0,
        }
    }
}

impl FontMetrics {
    pub fn descent(&self) -> u32 {
        self.total_height.saturating_sub(self.ascent)
    }

    /// Font-unit y coordinate the tallest glyph box is mapped to.
    pub fn highest_y(&self) -> f64 {
        self.height_ratio * f64::from(self.ascent)
    }
}
