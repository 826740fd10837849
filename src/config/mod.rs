pub mod job;
pub mod merged;
pub mod settings;

use std::path::{Path, PathBuf};

use job::JobFile;
use settings::Settings;

/// ジョブファイルと同じディレクトリの `settings.yaml` を読み込む。
///
/// 存在しなければデフォルト設定を返す。
pub fn load_settings_for_job(job_file_path: &Path) -> crate::error::Result<Settings> {
    let settings_path = job_dir(job_file_path).join("settings.yaml");

    if settings_path.exists() {
        Settings::from_file(&settings_path)
    } else {
        Ok(Settings::default())
    }
}

/// Read and parse a job YAML file.
pub fn load_job_file(job_file_path: &Path) -> crate::error::Result<JobFile> {
    let yaml = std::fs::read_to_string(job_file_path).map_err(|e| {
        crate::error::GlyphTracerError::config(format!(
            "Failed to read job file {}: {e}",
            job_file_path.display()
        ))
    })?;
    JobFile::from_yaml(&yaml)
}

/// Directory that relative paths inside a job file are resolved against.
pub fn job_dir(job_file_path: &Path) -> PathBuf {
    match job_file_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Resolve a potentially relative path against a base directory.
/// If the path is already absolute, return it as-is.
pub fn resolve_path(base_dir: &Path, path: impl AsRef<Path>) -> PathBuf {
    let p = path.as_ref();
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}
