// Phase 5: SFD(FontForge Spline Font Database) テキスト出力

use std::fmt::Write as _;
use std::io::Write;

use crate::error::{GlyphTracerError, Result};
use crate::glyph::assignment::ClaimedGlyph;
use crate::raster::bitmap::Bitmap;
use crate::sfd::FontMetrics;
use crate::sfd::scale::scale_for_glyphs;
use crate::trace::vectorizer::Vectorizer;
use crate::trace::{Contour, ContourPoint, Point, TracedGlyph, trace_glyphs};

const PROGRAM_NAME: &str = "Glyphtracer";

const GLYPH_FOOTER: &str = "EndSplineSet\nEndChar\n\n";

const DOCUMENT_FOOTER: &str = "EndChars\nEndSplineFont\n";

/// 全グリフをトレースしてからSFD文書を `sink` に書き出す。
///
/// スケールはトレース前に全体から一度だけ計算する。いずれかのグリフが
/// 失敗した場合は `sink` に何も書き込まずにエラーを返す。
#[allow(clippy::too_many_arguments)]
pub fn write_font_document<W: Write, V: Vectorizer + ?Sized>(
    sink: &mut W,
    font_name: &str,
    bitmap: &Bitmap,
    claimed: &[ClaimedGlyph],
    vectorizer: &V,
    metrics: &FontMetrics,
    workers: usize,
) -> Result<()> {
    let scale = scale_for_glyphs(claimed, metrics)?;
    let traced = trace_glyphs(bitmap, claimed, vectorizer, workers)?;
    write_document(sink, font_name, &traced, scale, metrics)
}

/// Serialize already traced glyphs.
pub fn write_document<W: Write>(
    sink: &mut W,
    font_name: &str,
    glyphs: &[TracedGlyph],
    scale: f64,
    metrics: &FontMetrics,
) -> Result<()> {
    let text = render_document(font_name, glyphs, scale, metrics);
    sink.write_all(text.as_bytes())
        .and_then(|_| sink.flush())
        .map_err(|e| GlyphTracerError::output_write(e.to_string()))
}

/// Build the complete document text.
pub fn render_document(
    font_name: &str,
    glyphs: &[TracedGlyph],
    scale: f64,
    metrics: &FontMetrics,
) -> String {
    let mut buf = document_header(font_name, metrics, glyphs.len());
    for glyph in glyphs {
        write_glyph(&mut buf, glyph, scale, metrics);
    }
    buf.push_str(DOCUMENT_FOOTER);
    buf
}

/// Advance width: box width in font units plus the right side bearing,
/// truncated toward zero.
pub fn advance_width(glyph_width: u32, scale: f64, metrics: &FontMetrics) -> i64 {
    (f64::from(glyph_width) * metrics.pixel_multiplier * scale + metrics.rbearing).trunc() as i64
}

fn document_header(font_name: &str, metrics: &FontMetrics, glyph_count: usize) -> String {
    format!(
        r#"SplineFontDB: 3.0
FontName: {font_name}
FullName: {font_name}
FamilyName: {font_name}
Weight: Medium
Copyright: Originally traced with {PROGRAM_NAME}
UComments: "No comments"
Version: 001.000
ItalicAngle: 0
UnderlinePosition: -100
UnderlineWidth: 50
Ascent: {ascent}
Descent: {descent}
LayerCount: 2
Layer: 0 0 "Back"  1
Layer: 1 0 "Fore"  0
NeedsXUIDChange: 1
XUID: [1021 397 1238052781 15881202]
OS2Version: 0
OS2_WeightWidthSlopeOnly: 0
OS2_UseTypoMetrics: 1
CreationTime: 1270926697
ModificationTime: 1271540628
OS2TypoAscent: 0
OS2TypoAOffset: 1
OS2TypoDescent: 0
OS2TypoDOffset: 1
OS2TypoLinegap: 0
OS2WinAscent: 0
OS2WinAOffset: 1
OS2WinDescent: 0
OS2WinDOffset: 1
HheadAscent: 0
HheadAOffset: 1
HheadDescent: 0
HheadDOffset: 1
OS2Vendor: 'GlTr'
DEI: 91125
Encoding: UnicodeBmp
UnicodeInterp: none
NameList: Adobe Glyph List
DisplaySize: -36
AntiAlias: 1
FitToEm: 1
WinInfo: 57 19 19
BeginChars: 65536 {glyph_count}

"#,
        ascent = metrics.ascent,
        descent = metrics.descent(),
    )
}

fn write_glyph(buf: &mut String, glyph: &TracedGlyph, scale: f64, metrics: &FontMetrics) {
    let codepoint = glyph.codepoint as u32;
    let width = advance_width(glyph.glyph_box.width, scale, metrics);

    // NOTE: `String` への `fmt::Write` は失敗しないため、以下の `.unwrap()` は安全。
    write!(
        buf,
        "StartChar: {}\nEncoding: {codepoint} {codepoint} 0\nWidth: {width}\n\
         VWidth: 0\nFlags: HW\nLayerCount: 2\nFore\nSplineSet\n",
        glyph.name
    )
    .unwrap();

    for contour in &glyph.contours {
        write_contour(buf, contour, scale);
    }
    buf.push_str(GLYPH_FOOTER);
}

/// 輪郭を `m` / `l` / `c` 行として書き出す。
///
/// フラグは次の点の種類で決まる:
/// 曲線は次が直線点なら 2、それ以外(末尾含む)は 0。
/// 直線は次が直線点なら 1、それ以外(末尾含む)は 2。
fn write_contour(buf: &mut String, contour: &Contour, scale: f64) {
    let Some(first) = contour.points.first() else {
        return;
    };
    write_point(buf, first.end(), scale);
    buf.push_str(" m 0\n");

    for (i, point) in contour.points.iter().enumerate().skip(1) {
        let next_is_line = contour
            .points
            .get(i + 1)
            .is_some_and(|next| !next.is_curve());
        buf.push(' ');
        match *point {
            ContourPoint::Curve { c1, c2, end } => {
                write_point(buf, c1, scale);
                buf.push(' ');
                write_point(buf, c2, scale);
                buf.push(' ');
                write_point(buf, end, scale);
                let flag = if next_is_line { 2 } else { 0 };
                writeln!(buf, " c {flag}").unwrap();
            }
            ContourPoint::On(p) => {
                write_point(buf, p, scale);
                let flag = if next_is_line { 1 } else { 2 };
                writeln!(buf, " l {flag}").unwrap();
            }
        }
    }
}

fn write_point(buf: &mut String, p: Point, scale: f64) {
    write_f64(buf, p.x as f64 * scale);
    buf.push(' ');
    write_f64(buf, p.y as f64 * scale);
}

/// `v` を往復可能な最短の10進表記で `buf` に直接書き込む。整数値は小数点なし。
///
/// `String` への `fmt::Write` は失敗しないため `.unwrap()` は安全。
fn write_f64(buf: &mut String, v: f64) {
    // -0 を 0 に正規化
    if v == 0.0 {
        buf.push('0');
    } else {
        write!(buf, "{v}").unwrap();
    }
}
