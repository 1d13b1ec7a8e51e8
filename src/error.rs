//! Error types for lintu.

/// Result type alias for lintu operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for lintu.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Run configuration validation failed. The run never starts.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Latitude outside the valid range.
    #[error("invalid latitude: {value} (must be -90.0 to 90.0)")]
    InvalidLatitude {
        /// Invalid latitude value.
        value: f64,
    },

    /// Longitude outside the valid range.
    #[error("invalid longitude: {value} (must be -180.0 to 180.0)")]
    InvalidLongitude {
        /// Invalid longitude value.
        value: f64,
    },

    /// Day of year outside the valid range.
    #[error("invalid day of year: {value} (must be 1 to 366)")]
    InvalidDayOfYear {
        /// Invalid day-of-year value.
        value: u16,
    },

    /// Metadata descriptor file is missing from the target directory.
    #[error("metadata descriptor not found: {path}")]
    MetadataMissing {
        /// Expected path of the descriptor.
        path: std::path::PathBuf,
    },

    /// Failed to read the metadata descriptor.
    #[error("failed to read metadata descriptor '{path}'")]
    MetadataRead {
        /// Path to the descriptor.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the metadata descriptor.
    #[error("failed to parse metadata descriptor '{path}'")]
    MetadataParse {
        /// Path to the descriptor.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// No valid audio files found.
    #[error("no valid audio files found in the provided directory")]
    NoValidAudioFiles,

    /// Failed to open audio file.
    #[error("failed to open audio file '{path}'")]
    AudioOpen {
        /// Path to the audio file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to decode audio.
    #[error("failed to decode audio from '{path}'")]
    AudioDecode {
        /// Path to the audio file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No audio tracks found.
    #[error("no audio tracks found in '{path}'")]
    NoAudioTracks {
        /// Path to the audio file.
        path: std::path::PathBuf,
    },

    /// Failed to resample audio.
    #[error("failed to resample audio: {reason}")]
    Resample {
        /// Description of the resampling failure.
        reason: String,
    },

    /// Failed to initialize the ONNX runtime.
    #[error("failed to initialize ONNX runtime: {reason}")]
    RuntimeInitialization {
        /// Description of the initialization failure.
        reason: String,
    },

    /// Failed to build the acoustic classifier.
    #[error("failed to build classifier: {reason}")]
    ClassifierBuild {
        /// Description of the build failure.
        reason: String,
    },

    /// Inference failed for a chunk.
    #[error("inference failed: {reason}")]
    Inference {
        /// Description of the inference failure.
        reason: String,
    },

    /// The inference runtime ran out of memory mid-chunk.
    ///
    /// Fatal for the file and never retried automatically; the operator
    /// must reduce chunk size or overlap.
    #[error(
        "inference runtime exhausted resources: {reason} \
         (reduce --chunk-size or --overlap and rerun)"
    )]
    ResourceExhausted {
        /// Description of the exhaustion.
        reason: String,
    },

    /// Model asset file does not exist.
    #[error("model asset not found: {path}")]
    AssetNotFound {
        /// Path to the missing asset.
        path: std::path::PathBuf,
    },

    /// Failed to read a parameter table (calibration, migration, occurrence).
    #[error("failed to read parameter table '{path}'")]
    TableRead {
        /// Path to the table file.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Parameter table contains an invalid row.
    #[error("invalid row in parameter table '{path}': {message}")]
    TableFormat {
        /// Path to the table file.
        path: std::path::PathBuf,
        /// Description of the format problem.
        message: String,
    },

    /// Failed to read the species name table.
    #[error("failed to read species table '{path}'")]
    SpeciesTableRead {
        /// Path to the species table.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Failed to write a result artifact.
    #[error("failed to write result file '{path}'")]
    ResultWrite {
        /// Path to the result file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the run summary.
    #[error("failed to serialize run summary")]
    SummarySerialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Whether this error is fatal for a single file but not for the batch.
    ///
    /// Configuration errors abort the whole run before it starts; everything
    /// else marks the file FAILED and lets the batch continue.
    pub fn is_per_file(&self) -> bool {
        !matches!(
            self,
            Self::ConfigValidation { .. }
                | Self::InvalidLatitude { .. }
                | Self::InvalidLongitude { .. }
                | Self::InvalidDayOfYear { .. }
        )
    }
}
