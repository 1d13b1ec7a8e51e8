//! Lintu - bird species detection from long field recordings.
//!
//! Analyzes a directory of audio files with an acoustic classification
//! model, calibrates and optionally adjusts the confidences with a species
//! distribution model, and writes one detection CSV per recording.

#![warn(missing_docs)]

pub mod aggregate;
pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod inference;
pub mod output;
pub mod pipeline;
pub mod sdm;
pub mod utils;

use chrono::Local;
use clap::Parser;
use cli::Cli;
use config::{AssetPaths, RunConfig, RunContext, load_site_metadata};
use inference::{AcousticClassifier, CalibrationTable, InferenceDevice, OnnxScorer};
use pipeline::{Analyzer, run_batch};
use sdm::{DistributionAdjuster, GridOccurrence, MigrationTable};
use std::sync::Arc;
use tracing::{info, warn};
use utils::SpeciesList;

pub use error::{Error, Result};

/// Main entry point for the lintu CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    // Initialize ONNX Runtime (auto-detects bundled libraries)
    birdnet_onnx::init_runtime().map_err(|e| Error::RuntimeInitialization {
        reason: e.to_string(),
    })?;

    let started_at = Local::now();

    let config = RunConfig {
        threshold: cli.threshold.unwrap_or(constants::DEFAULT_THRESHOLD),
        include_noise: cli.noise,
        include_sdm: cli.sdm,
        skip_existing: cli.skip,
        overlap: cli.overlap.unwrap_or(constants::DEFAULT_OVERLAP_SECS),
        chunk_size: cli.chunk_size.unwrap_or(constants::DEFAULT_CHUNK_SIZE_SECS),
        clip_duration: constants::CLIP_DURATION_SECS,
    };

    let site = load_site_metadata(&cli.directory)?;
    let ctx = RunContext::new(config, &site)?;
    info!(
        "Site: lat {:.4}, lon {:.4}, default day of year {}",
        ctx.latitude, ctx.longitude, ctx.day_of_year
    );

    let device = if cli.gpu {
        InferenceDevice::Gpu
    } else if cli.cpu {
        InferenceDevice::Cpu
    } else {
        InferenceDevice::Auto
    };

    let analyzer = build_analyzer(&cli.assets_dir, &ctx, device)?;

    let progress_enabled = !cli.quiet && !cli.no_progress;
    let summary = run_batch(&analyzer, &cli.directory, &ctx, progress_enabled)?;

    let summary_path =
        output::write_run_summary(&cli.directory, &ctx.config, &summary, started_at)?;
    info!("Run summary written to {}", summary_path.display());

    if summary.failed > 0 {
        warn!("{} file(s) failed", summary.failed);
    }

    Ok(())
}

/// Load all model assets and assemble the analysis components.
fn build_analyzer(
    assets_dir: &std::path::Path,
    ctx: &RunContext,
    device: InferenceDevice,
) -> Result<Analyzer> {
    let assets = AssetPaths::from_dir(assets_dir, ctx.config.include_sdm)?;

    info!("Loading species table: {}", assets.classes.display());
    let species = SpeciesList::from_csv(&assets.classes)?;

    info!("Loading model: {}", assets.model.display());
    let scorer = OnnxScorer::from_assets(&assets.model, &assets.labels, device)?;
    let calibration = CalibrationTable::from_csv(&assets.calibration)?;
    let classifier = AcousticClassifier::new(Arc::new(scorer), calibration);

    if species.len() != classifier.num_classes() {
        return Err(Error::ConfigValidation {
            message: format!(
                "species table has {} rows but the model has {} classes",
                species.len(),
                classifier.num_classes()
            ),
        });
    }

    let adjuster = if ctx.config.include_sdm {
        info!("Loading species distribution tables");
        let migration = MigrationTable::from_csv(&assets.migration)?;
        let occurrence = GridOccurrence::from_csv(&assets.occurrence)?;
        Some(DistributionAdjuster::new(migration, Box::new(occurrence)))
    } else {
        None
    };

    Ok(Analyzer::new(classifier, adjuster, species))
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // ORT logging is suppressed by default because CUDA fallback is expected
    // in auto mode. Use -v for ORT warnings, -vv for info, -vvv for trace.
    let filter_str = if quiet {
        "warn,ort=off".to_string()
    } else {
        match verbose {
            0 => "info,ort=off".to_string(),
            1 => "debug,ort=warn".to_string(),
            2 => "trace,ort=info".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    fmt().with_env_filter(filter).init();
}
