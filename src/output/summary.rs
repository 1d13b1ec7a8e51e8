//! Per-run summary artifact.
//!
//! After a batch completes, a JSON summary lands next to the results so a
//! later audit can tell which settings produced them and which files failed.

use crate::config::RunConfig;
use crate::constants::RUN_SUMMARY_PREFIX;
use crate::error::{Error, Result};
use crate::output::BatchSummary;
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    started_at: String,
    finished_at: String,
    config: &'a RunConfig,
    done: usize,
    skipped: usize,
    failed: usize,
    files: &'a [(String, crate::output::FileOutcome)],
}

/// Write the run summary JSON into `dir` and return its path.
pub fn write_run_summary(
    dir: &Path,
    config: &RunConfig,
    summary: &BatchSummary,
    started_at: chrono::DateTime<Local>,
) -> Result<PathBuf> {
    let finished_at = Local::now();
    let path = dir.join(format!(
        "{RUN_SUMMARY_PREFIX}{}.json",
        finished_at.format("%Y%m%dT%H%M%S")
    ));

    let record = RunSummary {
        started_at: started_at.to_rfc3339(),
        finished_at: finished_at.to_rfc3339(),
        config,
        done: summary.done,
        skipped: summary.skipped,
        failed: summary.failed,
        files: &summary.files,
    };

    let json =
        serde_json::to_string_pretty(&record).map_err(|e| Error::SummarySerialize { source: e })?;
    std::fs::write(&path, json).map_err(|e| Error::ResultWrite {
        path: path.clone(),
        source: e,
    })?;

    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::output::FileOutcome;
    use tempfile::TempDir;

    #[test]
    fn test_summary_written_with_counts_and_settings() {
        let dir = TempDir::new().unwrap();
        let config = RunConfig::default();
        let mut summary = BatchSummary::default();
        summary.record("a.wav".into(), FileOutcome::Done);
        summary.record("b.wav".into(), FileOutcome::Failed("decode error".into()));

        let path = write_run_summary(dir.path(), &config, &summary, Local::now()).unwrap();
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("inference_"));

        let contents = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["done"], 1);
        assert_eq!(value["failed"], 1);
        assert!(value["config"]["threshold"].is_number());
        assert!(contents.contains("decode error"));
    }
}
