// Phase 4: ベクタライザ出力(EPS描画コマンド) → 相対座標の輪郭列

use crate::error::{GlyphTracerError, Result};
use crate::trace::{ContourPoint, Point, RelativeContour};

/// One parsed drawing command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CurveTo(Point, Point, Point),
    ClosePath,
    /// `fill` / `newpath`: emitted between shapes when a glyph has several.
    Marker,
}

/// 生出力から `moveto` で終わる最初の行〜`closepath` で終わる最後の行までを切り出す。
///
/// 範囲外の行(EPSヘッダ、`fill` など)は捨てる。
pub fn extract_command_block<S: AsRef<str>>(lines: &[S]) -> Result<&[S]> {
    let first = lines
        .iter()
        .position(|l| l.as_ref().trim_end().ends_with("moveto"));
    let last = lines
        .iter()
        .rposition(|l| l.as_ref().trim_end().ends_with("closepath"));

    match (first, last) {
        (Some(first), Some(last)) if first <= last => Ok(&lines[first..=last]),
        _ => Err(GlyphTracerError::malformed(
            "",
            "no moveto ... closepath block in vectorizer output",
        )),
    }
}

/// Parse a single command line: integer operands followed by one opcode.
pub fn parse_command(line: &str) -> Result<PathCommand> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&opcode, operands)) = tokens.split_last() else {
        return Err(GlyphTracerError::malformed(line, "empty command line"));
    };

    let expected = match opcode {
        "moveto" | "rmoveto" | "rlineto" => 2,
        "rcurveto" => 6,
        "closepath" | "fill" | "newpath" => 0,
        other => {
            return Err(GlyphTracerError::malformed(
                line,
                format!("unknown PostScript command '{other}'"),
            ));
        }
    };
    if operands.len() != expected {
        return Err(GlyphTracerError::malformed(
            line,
            format!(
                "'{opcode}' takes {expected} operands, found {}",
                operands.len()
            ),
        ));
    }

    let values = operands
        .iter()
        .map(|t| {
            t.parse::<i64>().map_err(|_| {
                GlyphTracerError::malformed(line, format!("'{t}' is not an integer"))
            })
        })
        .collect::<Result<Vec<i64>>>()?;
    let point = |i: usize| Point::new(values[i], values[i + 1]);

    Ok(match opcode {
        "moveto" | "rmoveto" => PathCommand::MoveTo(point(0)),
        "rlineto" => PathCommand::LineTo(point(0)),
        "rcurveto" => PathCommand::CurveTo(point(0), point(2), point(4)),
        "closepath" => PathCommand::ClosePath,
        _ => PathCommand::Marker,
    })
}

/// Group one glyph's command stream into contours.
///
/// The stream must start with a move, every move must open a new contour
/// and every contour must be closed before the stream ends.
pub fn decode<S: AsRef<str>>(lines: &[S]) -> Result<Vec<RelativeContour>> {
    let mut contours = Vec::new();
    let mut points: Vec<ContourPoint> = Vec::new();

    for (i, raw) in lines.iter().enumerate() {
        let line = raw.as_ref();
        let command = parse_command(line)?;

        if i == 0 && !matches!(command, PathCommand::MoveTo(_)) {
            return Err(GlyphTracerError::malformed(
                line,
                "command stream must start with a move",
            ));
        }

        match command {
            PathCommand::MoveTo(p) => {
                if !points.is_empty() {
                    return Err(GlyphTracerError::malformed(
                        line,
                        "move inside an open contour",
                    ));
                }
                points.push(ContourPoint::On(p));
            }
            PathCommand::LineTo(_) | PathCommand::CurveTo(..) if points.is_empty() => {
                return Err(GlyphTracerError::malformed(
                    line,
                    "drawing command outside a contour",
                ));
            }
            PathCommand::LineTo(d) => points.push(ContourPoint::On(d)),
            PathCommand::CurveTo(c1, c2, end) => {
                points.push(ContourPoint::Curve { c1, c2, end });
            }
            PathCommand::ClosePath => {
                if points.is_empty() {
                    return Err(GlyphTracerError::malformed(
                        line,
                        "closepath without an open contour",
                    ));
                }
                contours.push(RelativeContour {
                    points: std::mem::take(&mut points),
                });
            }
            PathCommand::Marker => {}
        }
    }

    if !points.is_empty() {
        let last = lines.last().map_or("", |l| l.as_ref());
        return Err(GlyphTracerError::malformed(
            last,
            "unterminated contour at end of stream",
        ));
    }
    Ok(contours)
}
