// Phase 6: SHA-256（グリフ画像 + ベクタライザ識別子）
//
// Computes a cache key from a cropped glyph bitmap and the vectorizer that
// will trace it. The key is a SHA-256 hash encoded as a lowercase hexadecimal
// string.

use sha2::{Digest, Sha256};

use crate::raster::bitmap::Bitmap;

/// グリフ画像とベクタライザ識別子からキャッシュキー（SHA-256ハッシュ）を計算する。
///
/// ハッシュ入力: `vectorizer_identity || 0x00 || width || height || pixels`
/// ピクセルは1行ずつ8ピクセル単位でビットパックする。
pub fn compute_cache_key(glyph: &Bitmap, vectorizer_identity: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(vectorizer_identity.as_bytes());
    hasher.update([0u8]);
    hasher.update(glyph.width().to_le_bytes());
    hasher.update(glyph.height().to_le_bytes());

    for y in 0..glyph.height() {
        for chunk in glyph.row(y).chunks(8) {
            let byte = chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, &p)| acc | (u8::from(p) << (7 - i)));
            hasher.update([byte]);
        }
    }

    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_lowercase_hex_sha256() {
        let glyph = Bitmap::from_fn(3, 3, |x, y| x == y).unwrap();
        let key = compute_cache_key(&glyph, "potrace -c --eps -q");
        assert_eq!(key.len(), 64);
        assert!(key.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
    }

    #[test]
    fn test_key_depends_on_vectorizer_identity() {
        let glyph = Bitmap::from_fn(3, 3, |x, y| x == y).unwrap();
        assert_ne!(
            compute_cache_key(&glyph, "potrace"),
            compute_cache_key(&glyph, "/opt/potrace")
        );
    }

    #[test]
    fn test_key_depends_on_dimensions() {
        // Same bit pattern when row-packed, different shape.
        let wide = Bitmap::from_fn(4, 1, |_, _| false).unwrap();
        let tall = Bitmap::from_fn(1, 4, |_, _| false).unwrap();
        assert_ne!(
            compute_cache_key(&wide, "potrace"),
            compute_cache_key(&tall, "potrace")
        );
    }
}
