// Phase 7: ジョブ単位: 画像読込 → 分割 → 割り当て → トレース → SFD出力

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cache::CachingVectorizer;
use crate::cache::store::CacheStore;
use crate::config::job::{BoxTarget, GlyphAssignment, Job, SequenceAssignment};
use crate::config::merged::MergedConfig;
use crate::config::resolve_path;
use crate::error::{GlyphTracerError, Result};
use crate::glyph::assignment::BoxAssignments;
use crate::glyph::repertoire::{GlyphId, Repertoire};
use crate::raster::GlyphBox;
use crate::raster::bitmap::Bitmap;
use crate::raster::segmenter::{find_box, segment};
use crate::sfd::FontMetrics;
use crate::sfd::writer::write_font_document;
use crate::trace::vectorizer::{PotraceVectorizer, Vectorizer};

/// Configuration for a single job.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub image_path: PathBuf,
    pub output_path: PathBuf,
    pub font_name: String,
    pub vectorizer: PathBuf,
    pub cutoff: u32,
    pub parallel_workers: usize,
    pub cache_dir: Option<PathBuf>,
    pub metrics: FontMetrics,
    pub sequences: Vec<SequenceAssignment>,
    pub glyphs: Vec<GlyphAssignment>,
}

impl JobConfig {
    /// ジョブ定義と統合設定から JobConfig を組み立てる。
    ///
    /// 相対パスは `base_dir`（ジョブファイルのディレクトリ）基準で解決する。
    pub fn from_job(job: &Job, merged: &MergedConfig, base_dir: &Path) -> Self {
        JobConfig {
            image_path: resolve_path(base_dir, &job.image),
            output_path: resolve_path(base_dir, job.output_path()),
            font_name: merged.font_name.clone(),
            vectorizer: merged.vectorizer.clone(),
            cutoff: merged.cutoff,
            parallel_workers: merged.parallel_workers,
            cache_dir: merged
                .cache_dir
                .as_ref()
                .map(|dir| resolve_path(base_dir, dir)),
            metrics: merged.metrics,
            sequences: job.sequences.clone(),
            glyphs: job.glyphs.clone(),
        }
    }
}

/// Result of processing a single job.
#[derive(Debug, Clone)]
pub struct JobResult {
    pub image_path: PathBuf,
    pub output_path: PathBuf,
    pub boxes_found: usize,
    pub glyphs_written: usize,
}

/// Run a job with potrace, optionally behind the output cache.
pub fn run_job(config: &JobConfig) -> Result<JobResult> {
    let potrace = PotraceVectorizer::new(&config.vectorizer);
    match &config.cache_dir {
        Some(dir) => {
            debug!(cache_dir = %dir.display(), "vectorizer cache enabled");
            let cached = CachingVectorizer::new(potrace, CacheStore::new(dir));
            run_job_with(config, &cached)
        }
        None => run_job_with(config, &potrace),
    }
}

/// Run a job with the given vectorizer.
///
/// Image and segmentation errors abort before any glyph is traced. The
/// output file is only written once the whole document has been rendered.
pub fn run_job_with<V: Vectorizer + ?Sized>(
    config: &JobConfig,
    vectorizer: &V,
) -> Result<JobResult> {
    let bitmap = Bitmap::open(&config.image_path)?;
    let boxes = segment(&bitmap, config.cutoff);
    if boxes.is_empty() {
        return Err(GlyphTracerError::segmentation_empty(format!(
            "no foreground found in {}",
            config.image_path.display()
        )));
    }
    info!(
        image = %config.image_path.display(),
        width = bitmap.width(),
        height = bitmap.height(),
        boxes = boxes.len(),
        "segmented image"
    );
    let boxes_found = boxes.len();

    let repertoire = Repertoire::builtin();
    let assignments = resolve_assignments(&repertoire, boxes, &config.sequences, &config.glyphs)?;
    let claimed = assignments.claimed_glyphs(&repertoire);
    if claimed.is_empty() {
        return Err(GlyphTracerError::NoGlyphsClaimed);
    }
    info!(glyphs = claimed.len(), "tracing claimed glyphs");

    let mut document = Vec::new();
    write_font_document(
        &mut document,
        &config.font_name,
        &bitmap,
        &claimed,
        vectorizer,
        &config.metrics,
        config.parallel_workers,
    )?;

    std::fs::write(&config.output_path, document).map_err(|e| {
        GlyphTracerError::output_write(format!("{}: {e}", config.output_path.display()))
    })?;

    Ok(JobResult {
        image_path: config.image_path.clone(),
        output_path: config.output_path.clone(),
        boxes_found,
        glyphs_written: claimed.len(),
    })
}

/// ジョブの割り当て定義をボックス割り当て表に適用する。
///
/// `sequences` を先に、続いて `glyphs` を記述順に適用する。後の割り当ては
/// 既に使われているボックスを奪う（元の持ち主は未割り当てに戻る）。
pub fn resolve_assignments(
    repertoire: &Repertoire,
    boxes: Vec<GlyphBox>,
    sequences: &[SequenceAssignment],
    glyphs: &[GlyphAssignment],
) -> Result<BoxAssignments> {
    let mut assignments = BoxAssignments::new(boxes);

    for seq in sequences {
        let group = repertoire
            .groups()
            .iter()
            .position(|g| g.name == seq.group)
            .ok_or_else(|| {
                GlyphTracerError::config(format!("unknown glyph group '{}'", seq.group))
            })?;
        let available = repertoire.groups()[group].glyphs.len();
        if seq.boxes.len() > available {
            return Err(GlyphTracerError::config(format!(
                "group '{}' has {available} glyphs but {} boxes were given",
                seq.group,
                seq.boxes.len()
            )));
        }
        for (index, &box_index) in seq.boxes.iter().enumerate() {
            assign_logged(&mut assignments, GlyphId { group, index }, box_index)?;
        }
    }

    for entry in glyphs {
        let id = match &entry.group {
            Some(group) => repertoire.find_in_group(group, &entry.glyph),
            None => repertoire.find(&entry.glyph),
        }
        .ok_or_else(|| GlyphTracerError::config(format!("unknown glyph '{}'", entry.glyph)))?;

        let box_index = match entry.target()? {
            BoxTarget::Index(index) => index,
            BoxTarget::Point(x, y) => find_box(assignments.boxes(), x, y).ok_or_else(|| {
                GlyphTracerError::config(format!(
                    "glyph '{}': no box contains point ({x}, {y})",
                    entry.glyph
                ))
            })?,
        };
        assign_logged(&mut assignments, id, box_index)?;
    }

    Ok(assignments)
}

fn assign_logged(assignments: &mut BoxAssignments, glyph: GlyphId, box_index: usize) -> Result<()> {
    if let Some(previous) = assignments.owner_of(box_index)
        && previous != glyph
    {
        warn!(box_index, ?previous, ?glyph, "box reassigned to another glyph");
    }
    assignments.assign(glyph, box_index)
}
