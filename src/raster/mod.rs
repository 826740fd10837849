pub mod bitmap;
pub mod segmenter;

use serde::{Deserialize, Serialize};

/// 画像ピクセル座標系の矩形（グリフ候補ボックス）。
///
/// `width` / `height` はインクを含む列数・行数で、右端・下端は
/// `x + width - 1` / `y + height - 1` となる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlyphBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl GlyphBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the pixel `(px, py)` lies inside the box.
    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x
            && py >= self.y
            && u64::from(px) < u64::from(self.x) + u64::from(self.width)
            && u64::from(py) < u64::from(self.y) + u64::from(self.height)
    }
}
