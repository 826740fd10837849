use std::path::PathBuf;

use super::job::Job;
use super::settings::Settings;
use crate::sfd::FontMetrics;

/// ジョブのフォント名が省略された場合の既定値。
pub const DEFAULT_FONT_NAME: &str = "MyFont";

#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub font_name: String,
    pub vectorizer: PathBuf,
    pub cutoff: u32,
    pub parallel_workers: usize,
    pub cache_dir: Option<PathBuf>,
    pub metrics: FontMetrics,
}

impl MergedConfig {
    /// JobのOption値がSomeならJobの値を、NoneならSettingsの値を使用する。
    pub fn new(settings: &Settings, job: &Job) -> Self {
        MergedConfig {
            font_name: job
                .font_name
                .clone()
                .unwrap_or_else(|| DEFAULT_FONT_NAME.to_string()),
            vectorizer: job
                .vectorizer
                .clone()
                .unwrap_or_else(|| settings.vectorizer.clone()),
            cutoff: job.cutoff.unwrap_or(settings.cutoff),
            parallel_workers: settings.parallel_workers,
            cache_dir: settings.cache_dir.clone(),
            metrics: settings.metrics,
        }
    }
}
