// Phase 4: 相対座標 → 絶対座標、輪郭の向き反転

use crate::error::{GlyphTracerError, Result};
use crate::trace::{Contour, ContourPoint, Point, RelativeContour};

/// Absolute coordinates with the winding direction the SFD format expects.
pub fn normalize(relative: &RelativeContour) -> Result<Contour> {
    flip_winding(&to_absolute(relative)?)
}

/// 相対座標の輪郭を絶対座標に変換する。
///
/// 曲線の3つの座標ペアはいずれもコマンド開始時点の現在点からのオフセット。
/// 各エントリの後、現在点はその終点になる。
pub fn to_absolute(relative: &RelativeContour) -> Result<Contour> {
    let Some(&ContourPoint::On(start)) = relative.points.first() else {
        return Err(GlyphTracerError::malformed(
            "",
            "contour does not start with an on-curve move",
        ));
    };

    let mut points = Vec::with_capacity(relative.points.len());
    points.push(ContourPoint::On(start));
    let mut current = start;

    for p in &relative.points[1..] {
        let shift = |d: Point| {
            current.offset(d).ok_or_else(|| {
                GlyphTracerError::malformed(
                    format!("{} {}", d.x, d.y),
                    format!(
                        "coordinate overflow adding ({}, {}) to ({}, {})",
                        d.x, d.y, current.x, current.y
                    ),
                )
            })
        };
        let absolute = match *p {
            ContourPoint::On(d) => ContourPoint::On(shift(d)?),
            ContourPoint::Curve { c1, c2, end } => ContourPoint::Curve {
                c1: shift(c1)?,
                c2: shift(c2)?,
                end: shift(end)?,
            },
        };
        current = absolute.end();
        points.push(absolute);
    }

    Ok(Contour { points })
}

/// Reverse the traversal direction of a closed contour.
///
/// The start point stays first. Walking the original backwards, each entry
/// ends at its predecessor's endpoint; curves also swap their control
/// points so the Bézier geometry is unchanged. Applying it twice gives back
/// the original contour.
pub fn flip_winding(contour: &Contour) -> Result<Contour> {
    let (Some(first), Some(last)) = (contour.points.first(), contour.points.last()) else {
        return Err(GlyphTracerError::unclosed_contour("empty contour"));
    };
    if first.end() != last.end() {
        return Err(GlyphTracerError::unclosed_contour(format!(
            "starts at ({}, {}) but ends at ({}, {})",
            first.end().x,
            first.end().y,
            last.end().x,
            last.end().y
        )));
    }

    let mut flipped = Vec::with_capacity(contour.points.len());
    flipped.push(*first);
    for i in (1..contour.points.len()).rev() {
        let previous = contour.points[i - 1].end();
        flipped.push(match contour.points[i] {
            ContourPoint::On(_) => ContourPoint::On(previous),
            ContourPoint::Curve { c1, c2, .. } => ContourPoint::Curve {
                c1: c2,
                c2: c1,
                end: previous,
            },
        });
    }

    Ok(Contour { points: flipped })
}
