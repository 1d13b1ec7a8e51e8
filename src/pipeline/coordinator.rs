//! Batch coordination over a directory of recordings.
//!
//! The batch is resumable by construction: each file either leaves a
//! complete result artifact behind or nothing at all, and a rerun with
//! skip-existing enabled picks up where the previous run stopped.

use crate::config::RunContext;
use crate::constants::{AUDIO_EXTENSIONS, RESULTS_SUFFIX};
use crate::error::{Error, Result};
use crate::output::{self, BatchSummary, FileOutcome};
use crate::pipeline::Analyzer;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Result artifact path for an audio file: the file's own name with the
/// results suffix appended, in the same directory.
///
/// The full name including the audio extension is kept so that siblings
/// differing only in extension never collide.
pub fn results_path_for(input: &Path) -> PathBuf {
    let file_name = input
        .file_name()
        .map_or_else(|| std::borrow::Cow::Borrowed("output"), OsStr::to_string_lossy);
    input.with_file_name(format!("{file_name}{RESULTS_SUFFIX}"))
}

/// Whether a complete result artifact already exists for a file.
pub fn has_results(input: &Path) -> bool {
    results_path_for(input).exists()
}

/// Recursively collect the supported audio files under a directory,
/// sorted by path for a deterministic processing order.
pub fn collect_audio_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_recursive(dir, &mut files)?;
    files.sort();

    if files.is_empty() {
        return Err(Error::NoValidAudioFiles);
    }

    Ok(files)
}

fn collect_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_recursive(&path, files)?;
        } else if is_audio_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}

/// Check if a file has a supported audio extension.
fn is_audio_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        // Compare as OsStr to handle non-UTF-8 filenames
        AUDIO_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(OsStr::new(known)))
    })
}

/// Process every audio file under a directory.
///
/// A per-file failure is recorded and the batch moves on; only errors that
/// invalidate the whole run (configuration, missing assets) abort it.
pub fn run_batch(
    analyzer: &Analyzer,
    dir: &Path,
    ctx: &RunContext,
    progress_enabled: bool,
) -> Result<BatchSummary> {
    let files = collect_audio_files(dir)?;
    info!("Found {} audio files in {}", files.len(), dir.display());

    let file_progress = output::create_file_progress(files.len(), progress_enabled);
    let mut summary = BatchSummary::default();

    for file in &files {
        let name = file
            .file_name()
            .map_or_else(|| file.display().to_string(), |n| n.to_string_lossy().into_owned());

        if ctx.config.skip_existing && has_results(file) {
            info!("SKIPPED {name}: results already exist");
            summary.record(name, FileOutcome::Skipped);
            output::inc_progress(file_progress.as_ref());
            continue;
        }

        match analyzer.process_file(file, ctx, progress_enabled) {
            Ok(detections) => {
                info!("DONE {name}: {detections} detections");
                summary.record(name, FileOutcome::Done);
            }
            Err(err) if err.is_per_file() => {
                error!("FAILED {name}: {err}");
                summary.record(name, FileOutcome::Failed(err.to_string()));
            }
            Err(err) => {
                output::finish_progress(file_progress, "aborted");
                return Err(err);
            }
        }

        output::inc_progress(file_progress.as_ref());
    }

    output::finish_progress(file_progress, "Batch complete");
    info!(
        "Batch finished: {} done, {} skipped, {} failed",
        summary.done, summary.skipped, summary.failed
    );

    Ok(summary)
}
