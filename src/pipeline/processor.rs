//! Single file analysis pipeline.

use crate::aggregate::aggregate;
use crate::audio::{chunk_spans, decode_audio_file, resample, span_samples, window_chunk};
use crate::config::RunContext;
use crate::constants::MODEL_SAMPLE_RATE;
use crate::error::Result;
use crate::inference::{AcousticClassifier, SegmentScores};
use crate::output::{self, Detection};
use crate::pipeline::results_path_for;
use crate::sdm::DistributionAdjuster;
use crate::utils::SpeciesList;
use crate::utils::date;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// The loaded analysis components, shared across all files of a run.
///
/// Everything here is read-only after construction; the models are loaded
/// once and reused for the whole batch.
pub struct Analyzer {
    classifier: AcousticClassifier,
    adjuster: Option<DistributionAdjuster>,
    species: SpeciesList,
}

impl Analyzer {
    /// Bundle the classifier, the optional distribution adjuster and the
    /// species name table.
    pub fn new(
        classifier: AcousticClassifier,
        adjuster: Option<DistributionAdjuster>,
        species: SpeciesList,
    ) -> Self {
        Self {
            classifier,
            adjuster,
            species,
        }
    }

    /// Analyze one audio file and return its aggregated detections.
    ///
    /// This is the whole per-file pipeline short of writing the artifact:
    /// decode, resample, chunk, window, score, adjust, aggregate. Library
    /// consumers embedding the analysis call this directly.
    pub fn classify_file(&self, input_path: &Path, ctx: &RunContext) -> Result<Vec<Detection>> {
        self.classify_file_inner(input_path, ctx, false)
    }

    fn classify_file_inner(
        &self,
        input_path: &Path,
        ctx: &RunContext,
        progress_enabled: bool,
    ) -> Result<Vec<Detection>> {
        let file_name = input_path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());

        // A date embedded in the file name beats the run-level default.
        let day_of_year = date::day_of_year_from_filename(&file_name).unwrap_or(ctx.day_of_year);

        info!("Decoding audio...");
        let decoded = decode_audio_file(input_path)?;
        info!("Decoded {:.1}s of audio", decoded.duration_secs);

        let samples = if decoded.sample_rate == MODEL_SAMPLE_RATE {
            decoded.samples
        } else {
            debug!(
                "Resampling from {} Hz to {} Hz...",
                decoded.sample_rate, MODEL_SAMPLE_RATE
            );
            resample(decoded.samples, decoded.sample_rate, MODEL_SAMPLE_RATE)?
        };

        let spans = chunk_spans(decoded.duration_secs, ctx.config.chunk_size);
        debug!(
            "Analyzing {} chunks of up to {}s",
            spans.len(),
            ctx.config.chunk_size
        );

        let progress = output::create_chunk_progress(spans.len(), &file_name, progress_enabled);

        let mut scores: Vec<SegmentScores> = Vec::new();
        for span in &spans {
            let chunk = span_samples(&samples, MODEL_SAMPLE_RATE, span);
            let segments = window_chunk(
                chunk,
                MODEL_SAMPLE_RATE,
                ctx.config.clip_duration,
                ctx.config.overlap,
            );
            let chunk_scores = self
                .classifier
                .classify_chunk(span.start_secs, &segments, ctx.config.clip_duration)
                .inspect_err(|_| output::finish_progress(progress.clone(), "failed"))?;

            if let Some(adjuster) = &self.adjuster {
                scores.extend(chunk_scores.into_iter().map(|mut segment| {
                    for (class_index, score) in segment.scores.iter_mut().enumerate() {
                        *score = adjuster.adjust(
                            class_index,
                            *score,
                            ctx.latitude,
                            ctx.longitude,
                            day_of_year,
                        );
                    }
                    segment
                }));
            } else {
                scores.extend(chunk_scores);
            }

            output::inc_progress(progress.as_ref());
        }

        output::finish_progress(progress, "Inference complete");

        aggregate(
            &scores,
            &self.species,
            ctx.config.threshold,
            ctx.config.include_noise,
        )
    }

    /// Analyze one audio file and write its result artifact.
    ///
    /// The artifact is written once, after the whole file has been analyzed,
    /// so no partial result ever exists on disk.
    pub fn process_file(
        &self,
        input_path: &Path,
        ctx: &RunContext,
        progress_enabled: bool,
    ) -> Result<usize> {
        let start_time = Instant::now();
        info!("Processing: {}", input_path.display());

        let detections = self.classify_file_inner(input_path, ctx, progress_enabled)?;

        let output_path = results_path_for(input_path);
        debug!("Writing results: {}", output_path.display());
        output::write_results(&output_path, &detections)?;

        info!(
            "Found {} detections in {:.2}s",
            detections.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(detections.len())
    }
}
