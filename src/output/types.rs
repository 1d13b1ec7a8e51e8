//! Result data structures.

use serde::Serialize;

/// One detection in the final, aggregated results.
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    /// Scientific name of the detected species.
    pub scientific_name: String,
    /// Common name of the detected species.
    pub common_name: String,
    /// Detection start in seconds from the beginning of the file.
    pub start_secs: f64,
    /// Detection end in seconds.
    pub end_secs: f64,
    /// Confidence after calibration and any distribution adjustment.
    pub confidence: f32,
    /// Whether this row is a noise class rather than a bird species.
    pub is_noise: bool,
}

/// Terminal state of one audio file within a batch.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum FileOutcome {
    /// Analyzed and results written.
    Done,
    /// Skipped because a result artifact already existed.
    Skipped,
    /// Failed; the error message is retained for the run summary.
    Failed(String),
}

/// Aggregate counts and per-file outcomes for one batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    /// Files analyzed to completion.
    pub done: usize,
    /// Files skipped due to existing results.
    pub skipped: usize,
    /// Files that failed.
    pub failed: usize,
    /// Outcome per file, keyed by file name, in processing order.
    pub files: Vec<(String, FileOutcome)>,
}

impl BatchSummary {
    /// Record one file's outcome.
    pub fn record(&mut self, name: String, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Done => self.done += 1,
            FileOutcome::Skipped => self.skipped += 1,
            FileOutcome::Failed(_) => self.failed += 1,
        }
        self.files.push((name, outcome));
    }

    /// Total number of files seen.
    pub fn total(&self) -> usize {
        self.done + self.skipped + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_track_outcomes() {
        let mut summary = BatchSummary::default();
        summary.record("a.wav".into(), FileOutcome::Done);
        summary.record("b.wav".into(), FileOutcome::Skipped);
        summary.record("c.wav".into(), FileOutcome::Failed("decode error".into()));
        summary.record("d.wav".into(), FileOutcome::Done);

        assert_eq!(summary.done, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.files.len(), 4);
    }
}
