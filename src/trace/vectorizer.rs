// Phase 4: 外部ベクタライザ(potrace) CLIラッパー

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{GlyphTracerError, Result};
use crate::raster::bitmap::Bitmap;

/// Turns a single-glyph bitmap into raw drawing-command output lines.
///
/// Implementations return the tool's output untouched; bracketing and
/// parsing happen in [`crate::trace::decoder`].
pub trait Vectorizer: Sync {
    /// Stable description of the tool and its options, used in cache keys.
    fn identity(&self) -> String;

    fn vectorize(&self, glyph: &Bitmap) -> Result<Vec<String>>;
}

/// Runs `potrace -c --eps -q <file> -o -` on a temporary PGM file.
#[derive(Debug, Clone)]
pub struct PotraceVectorizer {
    program: PathBuf,
}

impl PotraceVectorizer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// `potrace -h` が成功するか確認する。
    pub fn check_available(&self) -> Result<()> {
        let output = Command::new(&self.program)
            .arg("-h")
            .output()
            .map_err(|e| {
                GlyphTracerError::vectorizer(format!(
                    "failed to execute {}: {e}",
                    self.program.display()
                ))
            })?;
        if output.status.success() {
            Ok(())
        } else {
            Err(GlyphTracerError::vectorizer(format!(
                "{} -h exited with {}",
                self.program.display(),
                output.status
            )))
        }
    }
}

impl Vectorizer for PotraceVectorizer {
    fn identity(&self) -> String {
        format!("{} -c --eps -q", self.program.display())
    }

    fn vectorize(&self, glyph: &Bitmap) -> Result<Vec<String>> {
        let mut pgm = Vec::new();
        glyph.write_pgm(&mut pgm)?;

        let mut tmp = tempfile::Builder::new()
            .prefix("glyphtracer-")
            .suffix(".pgm")
            .tempfile()
            .map_err(|e| GlyphTracerError::vectorizer(format!("failed to create temp file: {e}")))?;
        tmp.write_all(&pgm)
            .and_then(|_| tmp.flush())
            .map_err(|e| {
                GlyphTracerError::vectorizer(format!("could not save cropped image: {e}"))
            })?;
        // Close the handle but keep the path; the file is removed when `path` drops.
        let path = tmp.into_temp_path();

        let output = Command::new(&self.program)
            .args(["-c", "--eps", "-q"])
            .arg(&*path)
            .args(["-o", "-"])
            .output();

        match output {
            Ok(result) => {
                if result.status.success() {
                    Ok(String::from_utf8_lossy(&result.stdout)
                        .lines()
                        .map(str::to_string)
                        .collect())
                } else {
                    let stderr = String::from_utf8_lossy(&result.stderr);
                    Err(GlyphTracerError::vectorizer(format!(
                        "{} failed (exit code {}): {}",
                        self.program.display(),
                        result
                            .status
                            .code()
                            .map_or_else(|| "unknown".to_string(), |c| c.to_string()),
                        stderr.trim()
                    )))
                }
            }
            Err(e) => Err(GlyphTracerError::vectorizer(format!(
                "failed to execute {}: {e}",
                self.program.display()
            ))),
        }
    }
}
