//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used in user-facing messages.
pub const APP_NAME: &str = "lintu";

/// Sample rate expected by the acoustic model, in Hz.
pub const MODEL_SAMPLE_RATE: u32 = 48_000;

/// Duration of one analysis clip in seconds. Fixed by the acoustic model.
pub const CLIP_DURATION_SECS: f32 = 3.0;

/// Default confidence threshold for retaining detections.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Default overlap between consecutive analysis clips in seconds.
pub const DEFAULT_OVERLAP_SECS: f32 = 1.0;

/// Default chunk size in seconds. One chunk is one call to the model.
pub const DEFAULT_CHUNK_SIZE_SECS: u32 = 600;

/// Largest chunk size known to be safe for the inference runtime.
///
/// Larger chunks (1800 s was observed) get the process OOM-killed by the
/// operating system mid-inference. Validation warns above this bound.
pub const MAX_SAFE_CHUNK_SIZE_SECS: u32 = 600;

/// Largest clip overlap known to be safe for the inference runtime.
pub const MAX_SAFE_OVERLAP_SECS: f32 = 1.0;

/// Number of leading non-bird classes in the model output.
///
/// Class 0 is noise, class 1 is human speech. Both are dropped from the
/// results unless noise inclusion is requested.
pub const NOISE_CLASS_COUNT: usize = 2;

/// Suffix appended to an audio file name to form its result artifact name.
pub const RESULTS_SUFFIX: &str = ".results.csv";

/// Name of the per-directory metadata descriptor file.
pub const METADATA_FILENAME: &str = "metadata.toml";

/// File name prefix for the per-run summary written after a batch.
pub const RUN_SUMMARY_PREFIX: &str = "inference_";

/// Supported audio file extensions, matched case-insensitively.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "flac", "mp3", "m4a", "aac"];

/// Maximum valid day of year (leap years included).
pub const MAX_DAY_OF_YEAR: u16 = 366;

/// Day-of-year cap used by the migration model; day 366 folds onto 365.
pub const MIGRATION_DAY_CAP: u16 = 365;

/// Confidence value bounds and formatting.
pub mod confidence {
    /// Minimum valid confidence value.
    pub const MIN: f32 = 0.0;
    /// Maximum valid confidence value.
    pub const MAX: f32 = 1.0;
    /// Decimal places for confidence formatting in result tables.
    pub const DECIMAL_PLACES: usize = 4;
}

/// Model asset file names, resolved relative to the assets directory.
pub mod assets {
    /// Acoustic classification model.
    pub const MODEL: &str = "model.onnx";
    /// Model label list, one `Scientific_Common` label per line.
    pub const LABELS: &str = "labels.txt";
    /// Species name table (scientific and common names by class index).
    pub const CLASSES: &str = "classes.csv";
    /// Per-species Platt calibration coefficients.
    pub const CALIBRATION: &str = "calibration_params.csv";
    /// Per-species migration phenology parameters.
    pub const MIGRATION: &str = "migration_params.csv";
    /// Gridded species occurrence probabilities.
    pub const OCCURRENCE: &str = "occurrence_grid.csv";
}

/// Species distribution model constants.
pub mod sdm {
    /// Grid cell size of the occurrence lookup, in decimal degrees.
    pub const GRID_CELL_DEG: f64 = 0.1;
    /// Weight of the log-occurrence penalty in the adjustment formula.
    pub const PENALTY_WEIGHT: f64 = 0.25;
    /// Lower bound of the log-occurrence penalty, guards against -inf.
    pub const PENALTY_FLOOR: f64 = -10.0;
}
