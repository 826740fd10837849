// Phase 1: 二値ラスタ画像: 読込 → 二値検証 → 切り出し → PGM書き出し

use std::io::Write;
use std::path::Path;

use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{DynamicImage, ExtendedColorType, GrayImage, ImageEncoder, Luma};

use crate::error::{GlyphTracerError, Result};
use crate::raster::GlyphBox;

/// Row-major 1-bit raster. `true` is foreground (ink).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl Bitmap {
    /// Build a bitmap from row-major pixel data.
    ///
    /// Zero-sized images and pixel buffers that do not match the dimensions
    /// are rejected.
    pub fn new(width: u32, height: u32, pixels: Vec<bool>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GlyphTracerError::invalid_image(format!(
                "image has zero dimension ({width}x{height})"
            )));
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(GlyphTracerError::invalid_image(format!(
                "pixel buffer has {} entries, expected {expected} for {width}x{height}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a bitmap by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Result<Self> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self::new(width, height, pixels)
    }

    /// デコード済み画像を二値ビットマップへ変換する。
    ///
    /// 全ピクセルが純黒(0)または純白(255)でなければ `InvalidImage` を返す。
    /// 黒がインク(前景)となる。
    pub fn from_image(img: &DynamicImage) -> Result<Self> {
        if img.width() == 0 || img.height() == 0 {
            return Err(GlyphTracerError::invalid_image(format!(
                "image has zero dimension ({}x{})",
                img.width(),
                img.height()
            )));
        }

        let gray = img.to_luma8();
        let mut pixels = Vec::with_capacity(gray.as_raw().len());
        for (x, y, Luma([level])) in gray.enumerate_pixels() {
            match *level {
                0 => pixels.push(true),
                255 => pixels.push(false),
                other => {
                    return Err(GlyphTracerError::invalid_image(format!(
                        "not a 1 bit image: gray level {other} at ({x}, {y})"
                    )));
                }
            }
        }

        Self::new(gray.width(), gray.height(), pixels)
    }

    /// Load and validate an image file.
    pub fn open(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|e| {
            GlyphTracerError::invalid_image(format!("{}: {e}", path.display()))
        })?;
        Self::from_image(&img)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel value at `(x, y)`. Coordinates must be in range.
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// One scan line.
    pub fn row(&self, y: u32) -> &[bool] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Number of foreground pixels.
    pub fn ink_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    /// Copy the region covered by `rect` into a new bitmap.
    pub fn crop(&self, rect: &GlyphBox) -> Result<Bitmap> {
        let right = u64::from(rect.x) + u64::from(rect.width);
        let bottom = u64::from(rect.y) + u64::from(rect.height);
        if right > u64::from(self.width) || bottom > u64::from(self.height) {
            return Err(GlyphTracerError::invalid_image(format!(
                "crop {rect:?} exceeds image bounds {}x{}",
                self.width, self.height
            )));
        }

        let mut pixels = Vec::with_capacity(rect.width as usize * rect.height as usize);
        for y in rect.y..rect.y + rect.height {
            let row = self.row(y);
            pixels.extend_from_slice(&row[rect.x as usize..(rect.x + rect.width) as usize]);
        }
        Bitmap::new(rect.width, rect.height, pixels)
    }

    /// 8-bit grayscale rendering: ink is black, background white.
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.get(x, y) { Luma([0]) } else { Luma([255]) }
        })
    }

    /// Write the bitmap as a binary PGM (P5), the input format potrace reads.
    pub fn write_pgm<W: Write>(&self, writer: W) -> Result<()> {
        let gray = self.to_gray_image();
        PnmEncoder::new(writer)
            .with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary))
            .write_image(
                gray.as_raw(),
                self.width,
                self.height,
                ExtendedColorType::L8,
            )
            .map_err(|e| std::io::Error::other(format!("PGM encode failed: {e}")))?;
        Ok(())
    }
}
