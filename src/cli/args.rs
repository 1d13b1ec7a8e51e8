//! CLI argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// Bird species detection from field recordings.
#[derive(Debug, Parser)]
#[command(name = "lintu")]
#[command(author, version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory of audio recordings to analyze. Must contain a
    /// `metadata.toml` descriptor with the recording site coordinates.
    pub directory: PathBuf,

    /// Confidence threshold for retaining detections, in (0.0, 1.0].
    #[arg(short = 't', long, value_parser = parse_threshold, env = "LINTU_THRESHOLD")]
    pub threshold: Option<f32>,

    /// Overlap between consecutive analysis clips in seconds.
    #[arg(long, env = "LINTU_OVERLAP")]
    pub overlap: Option<f32>,

    /// Chunk size in seconds; one chunk is one model call.
    #[arg(long, env = "LINTU_CHUNK_SIZE")]
    pub chunk_size: Option<u32>,

    /// Keep detections of the noise and human-speech classes.
    #[arg(long)]
    pub noise: bool,

    /// Adjust confidences with the species distribution model.
    #[arg(long)]
    pub sdm: bool,

    /// Skip files whose result file already exists.
    #[arg(long)]
    pub skip: bool,

    /// Directory containing the model and parameter files.
    #[arg(long, default_value = "models", env = "LINTU_ASSETS_DIR")]
    pub assets_dir: PathBuf,

    /// Enable CUDA GPU acceleration.
    #[arg(long, conflicts_with = "cpu")]
    pub gpu: bool,

    /// Force CPU inference.
    #[arg(long, conflicts_with = "gpu")]
    pub cpu: bool,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace+ORT info, -vvv: full trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable progress bars without reducing log output.
    #[arg(long)]
    pub no_progress: bool,
}

/// Parse and validate the detection threshold.
fn parse_threshold(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if value <= 0.0 || value > 1.0 {
        return Err(format!(
            "threshold must be greater than 0.0 and at most 1.0, got {value}"
        ));
    }

    Ok(value)
}
