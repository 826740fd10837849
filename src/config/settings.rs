use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::sfd::FontMetrics;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// potrace 実行ファイル（PATH から検索される名前でもよい）
    pub vectorizer: PathBuf,
    /// 射影プロファイルでこの値以下の走査線を背景とみなす
    pub cutoff: u32,
    pub parallel_workers: usize,
    /// ベクタライザ出力キャッシュ。None ならキャッシュしない
    pub cache_dir: Option<PathBuf>,
    pub metrics: FontMetrics,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            vectorizer: PathBuf::from("potrace"),
            cutoff: 0,
            parallel_workers: 0,
            cache_dir: None,
            metrics: FontMetrics::default(),
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        serde_yml::from_str(yaml).map_err(|e| {
            crate::error::GlyphTracerError::config(format!("Failed to parse settings YAML: {e}"))
        })
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
