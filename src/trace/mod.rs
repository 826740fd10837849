// Phase 4: グリフ単位トレース: 切り出し → ベクタライザ → デコード → 正規化

pub mod decoder;
pub mod normalizer;
pub mod vectorizer;

use rayon::prelude::*;

use crate::error::{GlyphTracerError, Result};
use crate::glyph::assignment::ClaimedGlyph;
use crate::raster::GlyphBox;
use crate::raster::bitmap::Bitmap;
use vectorizer::Vectorizer;

/// Integer coordinate pair in vectorizer units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// `self + delta`, or `None` if either coordinate overflows.
    pub fn offset(self, delta: Point) -> Option<Point> {
        Some(Point::new(
            self.x.checked_add(delta.x)?,
            self.y.checked_add(delta.y)?,
        ))
    }
}

/// One entry of a contour: an on-curve point (2 components) or a cubic
/// segment with two control points and an endpoint (6 components).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContourPoint {
    On(Point),
    Curve { c1: Point, c2: Point, end: Point },
}

impl ContourPoint {
    /// The point the pen rests on after this entry.
    pub fn end(&self) -> Point {
        match *self {
            ContourPoint::On(p) => p,
            ContourPoint::Curve { end, .. } => end,
        }
    }

    pub fn is_curve(&self) -> bool {
        matches!(self, ContourPoint::Curve { .. })
    }
}

/// Decoder output: the first point is the absolute start, every later
/// entry holds deltas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeContour {
    pub points: Vec<ContourPoint>,
}

/// Absolute-coordinate closed contour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<ContourPoint>,
}

/// A claimed glyph with its normalized outline.
#[derive(Debug, Clone)]
pub struct TracedGlyph {
    pub name: String,
    pub codepoint: char,
    pub glyph_box: GlyphBox,
    pub contours: Vec<Contour>,
}

/// Trace one glyph. Errors are tagged with the glyph's name and codepoint.
pub fn trace_glyph<V: Vectorizer + ?Sized>(
    bitmap: &Bitmap,
    glyph: &ClaimedGlyph,
    vectorizer: &V,
) -> Result<TracedGlyph> {
    let trace = || -> Result<Vec<Contour>> {
        let crop = bitmap.crop(&glyph.glyph_box)?;
        let output = vectorizer.vectorize(&crop)?;
        let block = decoder::extract_command_block(&output)?;
        let relative = decoder::decode(block)?;
        relative.iter().map(normalizer::normalize).collect()
    };

    let contours = trace().map_err(|e| e.for_glyph(&glyph.name, glyph.codepoint))?;
    Ok(TracedGlyph {
        name: glyph.name.clone(),
        codepoint: glyph.codepoint,
        glyph_box: glyph.glyph_box,
        contours,
    })
}

/// Trace every glyph, keeping input order.
///
/// `workers == 0` uses rayon's global pool; otherwise a dedicated pool of
/// that size is built for the call.
pub fn trace_glyphs<V: Vectorizer + ?Sized>(
    bitmap: &Bitmap,
    glyphs: &[ClaimedGlyph],
    vectorizer: &V,
    workers: usize,
) -> Result<Vec<TracedGlyph>> {
    let trace_all = || {
        glyphs
            .par_iter()
            .map(|g| trace_glyph(bitmap, g, vectorizer))
            .collect::<Result<Vec<_>>>()
    };

    if workers == 0 {
        return trace_all();
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| GlyphTracerError::config(format!("failed to build thread pool: {e}")))?;
    pool.install(trace_all)
}
