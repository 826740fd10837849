use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::GlyphTracerError;

#[derive(Debug, Clone, Deserialize)]
pub struct JobFile {
    pub jobs: Vec<Job>,
}

impl JobFile {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        serde_yml::from_str(yaml).map_err(|e| {
            GlyphTracerError::config(format!("Failed to parse job YAML: {e}"))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    pub image: String,
    pub output: Option<String>,
    pub font_name: Option<String>,
    pub vectorizer: Option<PathBuf>,
    pub cutoff: Option<u32>,
    /// グループ単位の一括割り当て。個別の `glyphs` より先に適用される。
    #[serde(default)]
    pub sequences: Vec<SequenceAssignment>,
    #[serde(default)]
    pub glyphs: Vec<GlyphAssignment>,
}

impl Job {
    /// 出力パス。省略時は画像ファイルの拡張子を `sfd` に置き換えたもの。
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(output) => PathBuf::from(output),
            None => default_output_path(Path::new(&self.image)),
        }
    }
}

/// `scan.pbm` → `scan.sfd`
pub fn default_output_path(image: &Path) -> PathBuf {
    image.with_extension("sfd")
}

/// One glyph → box assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct GlyphAssignment {
    pub glyph: String,
    /// Restrict the name lookup to this group.
    pub group: Option<String>,
    #[serde(rename = "box")]
    pub box_index: Option<usize>,
    /// A pixel inside the wanted box.
    pub at: Option<[u32; 2]>,
}

/// Where an assignment points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxTarget {
    Index(usize),
    Point(u32, u32),
}

impl GlyphAssignment {
    /// `box` と `at` のどちらか一方だけが指定されていることを検証する。
    pub fn target(&self) -> crate::error::Result<BoxTarget> {
        match (self.box_index, self.at) {
            (Some(index), None) => Ok(BoxTarget::Index(index)),
            (None, Some([x, y])) => Ok(BoxTarget::Point(x, y)),
            (Some(_), Some(_)) => Err(GlyphTracerError::config(format!(
                "glyph '{}': specify either 'box' or 'at', not both",
                self.glyph
            ))),
            (None, None) => Err(GlyphTracerError::config(format!(
                "glyph '{}': missing 'box' or 'at'",
                self.glyph
            ))),
        }
    }
}

/// Assign a whole glyph group, in table order, to a list of boxes.
#[derive(Debug, Clone, Deserialize)]
pub struct SequenceAssignment {
    pub group: String,
    #[serde(deserialize_with = "deserialize_boxes")]
    pub boxes: Vec<usize>,
}

/// ボックス番号の範囲文字列をパースしてインデックスのベクタに変換する。
///
/// 形式:
/// - 単一ボックス: `"5"`
/// - 範囲: `"5-10"` (5, 6, 7, 8, 9, 10)
/// - 混合（カンマ区切り）: `"0, 3, 5-10, 15"`
///
/// 結果はソート済み・重複なし。
pub fn parse_index_range(s: &str) -> crate::error::Result<Vec<usize>> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(GlyphTracerError::config("Box range cannot be empty"));
    }

    let mut indices = Vec::new();

    for part in trimmed.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some((start_str, end_str)) = part.split_once('-') {
            let start: usize = start_str.trim().parse().map_err(|_| {
                GlyphTracerError::config(format!("Invalid box index in range: '{start_str}'"))
            })?;
            let end: usize = end_str.trim().parse().map_err(|_| {
                GlyphTracerError::config(format!("Invalid box index in range: '{end_str}'"))
            })?;

            if start > end {
                return Err(GlyphTracerError::config(format!(
                    "Invalid box range: start ({start}) > end ({end})"
                )));
            }

            indices.extend(start..=end);
        } else {
            let index: usize = part.parse().map_err(|_| {
                GlyphTracerError::config(format!("Invalid box index: '{part}'"))
            })?;
            indices.push(index);
        }
    }

    if indices.is_empty() {
        return Err(GlyphTracerError::config("Box range resolved to empty set"));
    }

    indices.sort();
    indices.dedup();
    Ok(indices)
}

/// serdeのdeserialize_withで使用するボックス範囲デシリアライザ
///
/// 整数1つ、整数のリスト、または範囲文字列を受け付ける。リストは記述順を保つ。
fn deserialize_boxes<'de, D>(deserializer: D) -> Result<Vec<usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Single(usize),
        List(Vec<usize>),
        Range(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Single(index) => Ok(vec![index]),
        Raw::List(indices) => Ok(indices),
        Raw::Range(s) => parse_index_range(&s).map_err(serde::de::Error::custom),
    }
}
