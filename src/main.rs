use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glyphtracer::config::merged::MergedConfig;
use glyphtracer::config;
use glyphtracer::glyph::repertoire::Repertoire;
use glyphtracer::pipeline::job_runner::JobConfig;
use glyphtracer::pipeline::orchestrator::run_all_jobs;
use glyphtracer::raster::bitmap::Bitmap;
use glyphtracer::raster::segmenter::segment;
use glyphtracer::trace::vectorizer::PotraceVectorizer;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: glyphtracer <jobs.yaml>...");
        eprintln!("       glyphtracer --boxes <image> [cutoff]");
        eprintln!("       glyphtracer --repertoire");
        eprintln!("  Trace glyph sheets into SFD fonts according to job specifications.");
        return if args.is_empty() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        eprintln!("glyphtracer {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    match args[0].as_str() {
        "--boxes" => print_boxes(&args[1..]),
        "--repertoire" => print_repertoire(),
        _ => run_job_files(&args),
    }
}

/// Segment an image and print its boxes as JSON, so box indices can be
/// picked for a job file.
fn print_boxes(args: &[String]) -> ExitCode {
    let Some(image) = args.first() else {
        eprintln!("ERROR: --boxes requires an image path");
        return ExitCode::FAILURE;
    };
    let cutoff = match args.get(1).map(|c| c.parse::<u32>()) {
        None => 0,
        Some(Ok(c)) => c,
        Some(Err(e)) => {
            eprintln!("ERROR: invalid cutoff '{}': {e}", args[1]);
            return ExitCode::FAILURE;
        }
    };

    let bitmap = match Bitmap::open(Path::new(image)) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };
    let boxes = segment(&bitmap, cutoff);
    match serde_json::to_string_pretty(&boxes) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_repertoire() -> ExitCode {
    match serde_json::to_string_pretty(&Repertoire::builtin()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_job_files(args: &[String]) -> ExitCode {
    let mut job_configs: Vec<JobConfig> = Vec::new();

    for job_file_arg in args {
        let job_file_path = Path::new(job_file_arg);

        // Load settings from the same directory as the job file.
        let settings = match config::load_settings_for_job(job_file_path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("ERROR: Failed to load settings for {job_file_arg}: {e}");
                return ExitCode::FAILURE;
            }
        };

        let job_file = match config::load_job_file(job_file_path) {
            Ok(jf) => jf,
            Err(e) => {
                eprintln!("ERROR: {job_file_arg}: {e}");
                return ExitCode::FAILURE;
            }
        };

        let job_dir = config::job_dir(job_file_path);
        for job in &job_file.jobs {
            let merged = MergedConfig::new(&settings, job);
            job_configs.push(JobConfig::from_job(job, &merged, &job_dir));
        }
    }

    // Fail early if a vectorizer is missing rather than on the first glyph.
    let programs: BTreeSet<&PathBuf> = job_configs.iter().map(|j| &j.vectorizer).collect();
    for program in programs {
        debug!(program = %program.display(), "checking vectorizer");
        if let Err(e) = PotraceVectorizer::new(program).check_available() {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    }

    debug!(jobs = job_configs.len(), "job files loaded");
    let results = run_all_jobs(&job_configs);

    let mut has_error = false;
    for (i, result) in results.iter().enumerate() {
        match result {
            Ok(job_result) => {
                eprintln!(
                    "OK: {} -> {} ({} glyphs from {} boxes)",
                    job_result.image_path.display(),
                    job_result.output_path.display(),
                    job_result.glyphs_written,
                    job_result.boxes_found
                );
            }
            Err(e) => {
                eprintln!(
                    "ERROR: {} -> {}: {e}",
                    job_configs[i].image_path.display(),
                    job_configs[i].output_path.display()
                );
                has_error = true;
            }
        }
    }

    if has_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
