// Phase 5: スケール計算・SFD出力テスト

use glyphtracer::error::{GlyphTracerError, Result};
use glyphtracer::glyph::assignment::ClaimedGlyph;
use glyphtracer::raster::GlyphBox;
use glyphtracer::raster::bitmap::Bitmap;
use glyphtracer::sfd::FontMetrics;
use glyphtracer::sfd::scale::{compute_scale, scale_for_glyphs};
use glyphtracer::sfd::writer::{advance_width, render_document, write_font_document};
use glyphtracer::trace::vectorizer::Vectorizer;

/// Returns the same 10×10 square for every glyph.
struct SquareVectorizer;

impl Vectorizer for SquareVectorizer {
    fn identity(&self) -> String {
        "square".to_string()
    }

    fn vectorize(&self, _glyph: &Bitmap) -> Result<Vec<String>> {
        Ok([
            "%!PS-Adobe-3.0 EPSF-3.0",
            "gsave",
            "0 0 moveto",
            "10 0 rlineto",
            "0 10 rlineto",
            "-10 0 rlineto",
            "0 -10 rlineto",
            "closepath",
            "fill",
            "grestore",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect())
    }
}

/// Fails on crops of a given width.
struct FailingVectorizer {
    fail_width: u32,
}

impl Vectorizer for FailingVectorizer {
    fn identity(&self) -> String {
        "failing".to_string()
    }

    fn vectorize(&self, glyph: &Bitmap) -> Result<Vec<String>> {
        if glyph.width() == self.fail_width {
            Err(GlyphTracerError::vectorizer("exit code 1"))
        } else {
            SquareVectorizer.vectorize(glyph)
        }
    }
}

fn claimed(name: &str, codepoint: char, glyph_box: GlyphBox) -> ClaimedGlyph {
    ClaimedGlyph {
        name: name.to_string(),
        codepoint,
        glyph_box,
    }
}

fn page() -> Bitmap {
    Bitmap::from_fn(64, 64, |_, _| false).unwrap()
}

// ============================================================
// 1. スケール
// ============================================================

#[test]
fn test_scale_from_tallest_box() {
    let scale = compute_scale([10, 20, 30], &FontMetrics::default()).unwrap();
    assert!((scale - 1474.2 / 300.0).abs() < 1e-9);
    assert!((scale - 4.914).abs() < 1e-9);
}

#[test]
fn test_scale_of_empty_set_is_no_glyphs_claimed() {
    let err = scale_for_glyphs(&[], &FontMetrics::default()).unwrap_err();
    assert!(matches!(err, GlyphTracerError::NoGlyphsClaimed));
}

#[test]
fn test_scale_rejects_zero_height() {
    assert!(compute_scale([0], &FontMetrics::default()).is_err());
}

#[test]
fn test_scale_rejects_non_positive_target_height() {
    let zero_ascent = FontMetrics {
        ascent: 0,
        ..FontMetrics::default()
    };
    assert!(matches!(
        compute_scale([10], &zero_ascent),
        Err(GlyphTracerError::ConfigError(_))
    ));

    let negative_ratio = FontMetrics {
        height_ratio: -0.5,
        ..FontMetrics::default()
    };
    assert!(matches!(
        compute_scale([10], &negative_ratio),
        Err(GlyphTracerError::ConfigError(_))
    ));

    let zero_multiplier = FontMetrics {
        pixel_multiplier: 0.0,
        ..FontMetrics::default()
    };
    assert!(compute_scale([10], &zero_multiplier).is_err());
}

#[test]
fn test_advance_width_truncates() {
    let metrics = FontMetrics::default();
    assert_eq!(advance_width(5, 4.914, &metrics), 395);
    assert_eq!(advance_width(0, 4.914, &metrics), 150);
}

// ============================================================
// 2. 文書構造
// ============================================================

#[test]
fn test_empty_document_header_and_footer() {
    let doc = render_document("TestFont", &[], 1.0, &FontMetrics::default());
    assert!(doc.starts_with("SplineFontDB: 3.0\nFontName: TestFont\n"));
    assert!(doc.contains("FullName: TestFont\n"));
    assert!(doc.contains("FamilyName: TestFont\n"));
    assert!(doc.contains("Ascent: 1638\n"));
    assert!(doc.contains("Descent: 410\n"));
    assert!(doc.contains("Encoding: UnicodeBmp\n"));
    assert!(doc.contains("BeginChars: 65536 0\n"));
    assert!(doc.ends_with("EndChars\nEndSplineFont\n"));
}

#[test]
fn test_glyph_block_with_square_outline() {
    let glyphs = vec![
        claimed("a", 'a', GlyphBox::new(0, 0, 5, 30)),
        claimed("b", 'b', GlyphBox::new(10, 0, 5, 20)),
    ];
    let mut sink = Vec::new();
    write_font_document(
        &mut sink,
        "Square",
        &page(),
        &glyphs,
        &SquareVectorizer,
        &FontMetrics::default(),
        0,
    )
    .expect("document written");
    let doc = String::from_utf8(sink).unwrap();

    assert!(doc.contains("BeginChars: 65536 2\n"));
    // 10 potrace units at the scale of the tallest (30 px) box, full precision
    let side = 10.0 * compute_scale([30], &FontMetrics::default()).unwrap();
    assert!((side - 49.14).abs() < 1e-9);
    let expected_a = format!(
        "StartChar: a\n\
         Encoding: 97 97 0\n\
         Width: 395\n\
         VWidth: 0\n\
         Flags: HW\n\
         LayerCount: 2\n\
         Fore\n\
         SplineSet\n\
         0 0 m 0\n \
         0 {side} l 1\n \
         {side} {side} l 1\n \
         {side} 0 l 1\n \
         0 0 l 2\n\
         EndSplineSet\n\
         EndChar\n\n"
    );
    assert!(doc.contains(&expected_a), "glyph block mismatch:\n{doc}");

    // glyphs appear in input order
    let a = doc.find("StartChar: a\n").unwrap();
    let b = doc.find("StartChar: b\n").unwrap();
    assert!(a < b);
    assert_eq!(doc.matches("StartChar:").count(), 2);
    assert!(doc.ends_with("EndChar\n\nEndChars\nEndSplineFont\n"));
}

#[test]
fn test_dedicated_worker_pool_gives_same_output() {
    let glyphs: Vec<ClaimedGlyph> = (0..8)
        .map(|i| {
            claimed(
                &format!("g{i}"),
                char::from(b'a' + i as u8),
                GlyphBox::new(i * 6, 0, 5, 10),
            )
        })
        .collect();
    let render = |workers| {
        let mut sink = Vec::new();
        write_font_document(
            &mut sink,
            "Pool",
            &page(),
            &glyphs,
            &SquareVectorizer,
            &FontMetrics::default(),
            workers,
        )
        .unwrap();
        sink
    };
    assert_eq!(render(0), render(2));
}

// ============================================================
// 3. エラー時は何も書かない
// ============================================================

#[test]
fn test_failed_glyph_leaves_sink_empty() {
    let glyphs = vec![
        claimed("a", 'a', GlyphBox::new(0, 0, 5, 10)),
        claimed("b", 'b', GlyphBox::new(10, 0, 7, 10)),
    ];
    let mut sink = Vec::new();
    let err = write_font_document(
        &mut sink,
        "Broken",
        &page(),
        &glyphs,
        &FailingVectorizer { fail_width: 7 },
        &FontMetrics::default(),
        0,
    )
    .unwrap_err();

    assert!(sink.is_empty());
    match &err {
        GlyphTracerError::Glyph {
            name, codepoint, ..
        } => {
            assert_eq!(name, "b");
            assert_eq!(*codepoint, u32::from('b'));
        }
        other => panic!("expected Glyph error, got {other:?}"),
    }
    assert!(matches!(
        err.root(),
        GlyphTracerError::VectorizerLaunchFailed(_)
    ));
}

#[test]
fn test_no_claimed_glyphs_writes_nothing() {
    let mut sink = Vec::new();
    let err = write_font_document(
        &mut sink,
        "Empty",
        &page(),
        &[],
        &SquareVectorizer,
        &FontMetrics::default(),
        0,
    )
    .unwrap_err();
    assert!(matches!(err, GlyphTracerError::NoGlyphsClaimed));
    assert!(sink.is_empty());
}
