// Phase 6: ファイルシステムキャッシュ: hash → ベクタライザ生出力
//
// Stores and retrieves raw vectorizer output lines on disk, keyed by SHA-256
// hash. Each entry is a single `<cache_dir>/<hex_hash>.json` file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::GlyphTracerError;

/// ファイルシステムベースのキャッシュストア。
///
/// `<cache_dir>/<hex_hash>.json` にベクタライザ出力を格納する。
pub struct CacheStore {
    cache_dir: PathBuf,
}

/// キャッシュエントリのJSON表現。
#[derive(serde::Serialize, serde::Deserialize)]
struct CacheEntry {
    cache_key: String,
    vectorizer: String,
    lines: Vec<String>,
}

/// キャッシュキーが有効な SHA-256 hex 文字列であることを検証する。
///
/// 有効なキーは正確に64文字の小文字16進数([0-9a-f])である必要がある。
/// パストラバーサルや不正なファイルアクセスを防止する。
fn validate_cache_key(key: &str) -> crate::error::Result<()> {
    if key.len() == 64 && key.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        Ok(())
    } else {
        Err(GlyphTracerError::cache(format!(
            "invalid cache key: expected 64-character lowercase hex string, got '{}'",
            key
        )))
    }
}

impl CacheStore {
    /// 指定されたディレクトリをキャッシュルートとして新しい CacheStore を作成する。
    pub fn new(cache_dir: impl AsRef<Path>) -> Self {
        Self {
            cache_dir: cache_dir.as_ref().to_path_buf(),
        }
    }

    /// キャッシュキーからエントリのパスを計算する。
    fn entry_path(&self, key: &str) -> crate::error::Result<PathBuf> {
        validate_cache_key(key)?;
        Ok(self.cache_dir.join(format!("{key}.json")))
    }

    /// ベクタライザ出力をキャッシュに保存する。
    ///
    /// キャッシュディレクトリが存在しない場合は自動的に作成する。
    /// 書き込みはアトミック: 一時ファイルに書き込み、最終パスへ移動する。
    pub fn store(&self, key: &str, vectorizer: &str, lines: &[String]) -> crate::error::Result<()> {
        let path = self.entry_path(key)?;
        fs::create_dir_all(&self.cache_dir).map_err(|e| GlyphTracerError::cache(e.to_string()))?;

        let entry = CacheEntry {
            cache_key: key.to_string(),
            vectorizer: vectorizer.to_string(),
            lines: lines.to_vec(),
        };
        let json = serde_json::to_string(&entry)?;

        // 同じキーへの並列書き込みがあり得る: 一意な一時ファイル → rename
        let mut tmp = tempfile::NamedTempFile::new_in(&self.cache_dir)
            .map_err(|e| GlyphTracerError::cache(e.to_string()))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| GlyphTracerError::cache(e.to_string()))?;
        tmp.persist(&path)
            .map_err(|e| GlyphTracerError::cache(e.to_string()))?;

        Ok(())
    }

    /// キャッシュからベクタライザ出力を取得する。キャッシュミスの場合は None を返す。
    pub fn retrieve(
        &self,
        key: &str,
        vectorizer: &str,
    ) -> crate::error::Result<Option<Vec<String>>> {
        let path = self.entry_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).map_err(|e| GlyphTracerError::cache(e.to_string()))?;
        let entry: CacheEntry = serde_json::from_str(&json)?;

        if entry.cache_key != key {
            return Err(GlyphTracerError::cache(format!(
                "cache key mismatch: expected '{}', found '{}'",
                key, entry.cache_key
            )));
        }

        // ベクタライザが一致しない場合はキャッシュミス
        if entry.vectorizer != vectorizer {
            return Ok(None);
        }

        Ok(Some(entry.lines))
    }

    /// キャッシュキーが存在するか確認する。
    pub fn contains(&self, key: &str) -> bool {
        self.entry_path(key).is_ok_and(|p| p.exists())
    }
}
