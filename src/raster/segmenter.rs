// Phase 2: 射影プロファイルによる分割: 行帯 → 列帯 → グリフボックス

use crate::raster::GlyphBox;
use crate::raster::bitmap::Bitmap;

/// Inclusive index range `[start, end]` of consecutive foreground scan lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strip {
    pub start: u32,
    pub end: u32,
}

impl Strip {
    /// Number of scan lines covered.
    pub fn span(&self) -> u32 {
        self.end - self.start + 1
    }
}

/// Foreground pixel count per row.
pub fn row_profile(bitmap: &Bitmap) -> Vec<u32> {
    (0..bitmap.height())
        .map(|y| bitmap.row(y).iter().filter(|&&p| p).count() as u32)
        .collect()
}

/// Foreground pixel count per column, restricted to the rows of `band`.
///
/// Same result as rotating the band by 90° and taking its row profile.
pub fn column_profile(bitmap: &Bitmap, band: Strip) -> Vec<u32> {
    let mut sums = vec![0u32; bitmap.width() as usize];
    for y in band.start..=band.end {
        for (sum, &pixel) in sums.iter_mut().zip(bitmap.row(y)) {
            *sum += u32::from(pixel);
        }
    }
    sums
}

/// プロファイルを走査し、`cutoff` を超える連続区間(前景ストリップ)を列挙する。
///
/// 末尾まで前景が続く場合は最後のインデックスで区間を閉じる。
pub fn find_strips(profile: &[u32], cutoff: u32) -> Vec<Strip> {
    let mut strips = Vec::new();
    let mut open: Option<u32> = None;

    for (i, &sum) in profile.iter().enumerate() {
        let i = i as u32;
        let foreground = sum > cutoff;
        match (open, foreground) {
            (None, true) => open = Some(i),
            (Some(start), false) => {
                strips.push(Strip { start, end: i - 1 });
                open = None;
            }
            _ => {}
        }
    }

    if let Some(start) = open {
        strips.push(Strip {
            start,
            end: profile.len() as u32 - 1,
        });
    }
    strips
}

/// Split a bilevel page into glyph boxes.
///
/// Boxes come out row band by row band, left to right inside each band.
/// A page without foreground yields no boxes.
pub fn segment(bitmap: &Bitmap, cutoff: u32) -> Vec<GlyphBox> {
    let mut boxes = Vec::new();
    for band in find_strips(&row_profile(bitmap), cutoff) {
        for column in find_strips(&column_profile(bitmap, band), cutoff) {
            boxes.push(GlyphBox::new(
                column.start,
                band.start,
                column.span(),
                band.span(),
            ));
        }
    }
    boxes
}

/// Index of the first box containing pixel `(x, y)`.
pub fn find_box(boxes: &[GlyphBox], x: u32, y: u32) -> Option<usize> {
    boxes.iter().position(|b| b.contains(x, y))
}
