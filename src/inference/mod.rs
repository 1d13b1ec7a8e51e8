//! Acoustic model inference.

mod calibration;
mod classifier;

pub use calibration::CalibrationTable;
pub use classifier::{AcousticClassifier, OnnxScorer, ScoringModel};

/// Device selection for the ONNX-backed scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InferenceDevice {
    /// GPU if available, silent fallback to CPU.
    #[default]
    Auto,
    /// Force CPU inference.
    Cpu,
    /// Prefer GPU, warn and fall back to CPU when unavailable.
    Gpu,
}

/// Per-species confidences for one analysis clip.
///
/// Times are file-absolute seconds; the score vector is indexed by model
/// class. Transient: produced per chunk, consumed by the aggregator, never
/// persisted.
#[derive(Debug, Clone)]
pub struct SegmentScores {
    /// Clip start in seconds from the beginning of the file.
    pub start_secs: f64,
    /// Clip end in seconds. May extend past the file end for a final
    /// zero-padded clip.
    pub end_secs: f64,
    /// Confidence per model class, in [0, 1].
    pub scores: Vec<f32>,
}
