//! Run configuration types.

use crate::config::SiteMetadata;
use crate::constants::{
    CLIP_DURATION_SECS, DEFAULT_CHUNK_SIZE_SECS, DEFAULT_OVERLAP_SECS, DEFAULT_THRESHOLD,
};
use crate::error::Result;
use crate::utils::date;
use serde::Serialize;

/// Immutable per-run analysis settings.
///
/// Constructed once per invocation, validated via
/// [`crate::config::validate_run_config`] before the run starts, and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunConfig {
    /// Confidence threshold for retaining detections, in (0, 1].
    pub threshold: f32,
    /// Keep detections of the noise and human-speech classes.
    pub include_noise: bool,
    /// Apply the species distribution adjustment.
    pub include_sdm: bool,
    /// Skip files whose result artifact already exists.
    pub skip_existing: bool,
    /// Overlap between consecutive analysis clips in seconds.
    pub overlap: f32,
    /// Chunk size in seconds; one chunk is one model call.
    pub chunk_size: u32,
    /// Analysis clip duration in seconds, fixed by the acoustic model.
    pub clip_duration: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            include_noise: false,
            include_sdm: false,
            skip_existing: false,
            overlap: DEFAULT_OVERLAP_SECS,
            chunk_size: DEFAULT_CHUNK_SIZE_SECS,
            clip_duration: CLIP_DURATION_SECS,
        }
    }
}

/// Immutable per-run context: validated configuration plus the recording
/// site location and the default day of year.
///
/// The day of year resolves, in priority order, from a date embedded in
/// each audio file name (applied later, per file), the metadata descriptor,
/// and finally today's date.
#[derive(Debug, Clone, Serialize)]
pub struct RunContext {
    /// Validated analysis settings.
    pub config: RunConfig,
    /// Recording site latitude in decimal degrees.
    pub latitude: f64,
    /// Recording site longitude in decimal degrees.
    pub longitude: f64,
    /// Default day of year for files without a filename-embedded date.
    pub day_of_year: u16,
}

impl RunContext {
    /// Build and validate a run context from settings and site metadata.
    pub fn new(config: RunConfig, site: &SiteMetadata) -> Result<Self> {
        crate::config::validate_run_config(&config)?;
        site.validate()?;

        Ok(Self {
            config,
            latitude: site.lat,
            longitude: site.lon,
            day_of_year: site.day_of_year.unwrap_or_else(date::current_day_of_year),
        })
    }
}
