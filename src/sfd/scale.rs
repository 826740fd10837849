// Phase 5: 座標スケール: potrace単位 → フォント単位

use crate::error::{GlyphTracerError, Result};
use crate::glyph::assignment::ClaimedGlyph;
use crate::sfd::FontMetrics;

/// 最も高いボックスが `highest_y` に収まる倍率を計算する。
///
/// `scale = highest_y / (pixel_multiplier × max_height)`
pub fn compute_scale(
    heights: impl IntoIterator<Item = u32>,
    metrics: &FontMetrics,
) -> Result<f64> {
    let max_height = heights
        .into_iter()
        .max()
        .ok_or(GlyphTracerError::NoGlyphsClaimed)?;
    if max_height == 0 {
        return Err(GlyphTracerError::config(
            "tallest claimed glyph box has zero height",
        ));
    }
    if metrics.pixel_multiplier <= 0.0 {
        return Err(GlyphTracerError::config(format!(
            "pixel_multiplier must be positive, got {}",
            metrics.pixel_multiplier
        )));
    }
    let highest_y = metrics.highest_y();
    if highest_y.is_nan() || highest_y <= 0.0 {
        return Err(GlyphTracerError::config(format!(
            "height_ratio × ascent must be positive, got {} × {}",
            metrics.height_ratio, metrics.ascent
        )));
    }
    Ok(highest_y / (metrics.pixel_multiplier * f64::from(max_height)))
}

/// Scale for a set of claimed glyphs.
pub fn scale_for_glyphs(glyphs: &[ClaimedGlyph], metrics: &FontMetrics) -> Result<f64> {
    compute_scale(glyphs.iter().map(|g| g.glyph_box.height), metrics)
}
