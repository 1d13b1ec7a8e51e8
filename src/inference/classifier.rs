//! Acoustic classifier: opaque scorer plus calibration.

use crate::audio::Segment;
use crate::error::{Error, Result};
use crate::inference::{CalibrationTable, InferenceDevice, SegmentScores};
use birdnet_onnx::{
    ClassifierBuilder, ExecutionProviderInfo, InferenceOptions, available_execution_providers,
    ort_execution_providers::CUDAExecutionProvider,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// An opaque acoustic scoring model.
///
/// The pipeline only sees this seam: a batch of equal-length audio clips in,
/// one dense per-class confidence vector per clip out. The production
/// implementation is [`OnnxScorer`]; tests substitute deterministic stubs.
/// Implementations hold read-only state only; one loaded model is shared
/// across the whole process lifetime.
pub trait ScoringModel: Send + Sync {
    /// Number of output classes.
    fn num_classes(&self) -> usize;

    /// Score a batch of clips. Returns one vector of `num_classes`
    /// confidences in [0, 1] per clip, in input order.
    fn score_batch(&self, segments: &[&[f32]]) -> Result<Vec<Vec<f32>>>;
}

/// ONNX-backed scorer using the birdnet-onnx runtime.
pub struct OnnxScorer {
    inner: birdnet_onnx::Classifier,
    options: InferenceOptions,
    num_classes: usize,
}

impl OnnxScorer {
    /// Load the model and labels and prepare an inference session.
    ///
    /// Weights are loaded once here; the resulting scorer is shared
    /// read-only for the rest of the process.
    pub fn from_assets(model: &Path, labels: &Path, device: InferenceDevice) -> Result<Self> {
        let num_classes = count_labels(labels)?;

        // Ask for every class so calibration sees the full score vector.
        let builder = ClassifierBuilder::new()
            .model_path(model.to_string_lossy().to_string())
            .labels_path(labels.to_string_lossy().to_string())
            .top_k(num_classes)
            .min_confidence(0.0);

        let builder = select_device(builder, device);

        let inner = builder.build().map_err(|e| Error::ClassifierBuild {
            reason: e.to_string(),
        })?;

        info!(
            "Loaded acoustic model: {} classes, sample_rate {}, clip {} s",
            num_classes,
            inner.config().sample_rate,
            inner.config().segment_duration
        );

        Ok(Self {
            inner,
            options: InferenceOptions::default(),
            num_classes,
        })
    }
}

impl ScoringModel for OnnxScorer {
    fn num_classes(&self) -> usize {
        self.num_classes
    }

    fn score_batch(&self, segments: &[&[f32]]) -> Result<Vec<Vec<f32>>> {
        let results = self
            .inner
            .predict_batch(segments, &self.options)
            .map_err(|e| inference_error(&e.to_string()))?;

        let mut dense = Vec::with_capacity(results.len());
        for result in results {
            let mut scores = vec![0.0f32; self.num_classes];
            for prediction in result.predictions {
                if let Some(slot) = scores.get_mut(prediction.index) {
                    *slot = prediction.confidence;
                }
            }
            dense.push(scores);
        }

        Ok(dense)
    }
}

/// The acoustic classification stage: scoring model plus Platt calibration.
///
/// One call covers one chunk; the batch is a single blocking operation from
/// the pipeline's perspective.
pub struct AcousticClassifier {
    model: Arc<dyn ScoringModel>,
    calibration: CalibrationTable,
}

impl AcousticClassifier {
    /// Wrap a shared scoring model with a calibration table.
    pub fn new(model: Arc<dyn ScoringModel>, calibration: CalibrationTable) -> Self {
        Self { model, calibration }
    }

    /// Number of output classes of the underlying model.
    pub fn num_classes(&self) -> usize {
        self.model.num_classes()
    }

    /// Score every segment of one chunk and calibrate the results.
    ///
    /// `chunk_start_secs` translates segment offsets to file-absolute
    /// times. An inference failure propagates for the whole chunk; nothing
    /// is silently skipped.
    pub fn classify_chunk(
        &self,
        chunk_start_secs: f64,
        segments: &[Segment],
        clip_duration_secs: f32,
    ) -> Result<Vec<SegmentScores>> {
        if segments.is_empty() {
            return Ok(Vec::new());
        }

        let batch: Vec<&[f32]> = segments.iter().map(|s| s.samples.as_slice()).collect();
        let raw = self.model.score_batch(&batch)?;

        if raw.len() != segments.len() {
            return Err(Error::Internal {
                message: format!(
                    "scorer returned {} results for {} segments",
                    raw.len(),
                    segments.len()
                ),
            });
        }

        let mut scored = Vec::with_capacity(segments.len());
        for (segment, mut scores) in segments.iter().zip(raw) {
            self.calibration.calibrate(&mut scores);
            let start_secs = chunk_start_secs + f64::from(segment.offset_secs);
            scored.push(SegmentScores {
                start_secs,
                end_secs: start_secs + f64::from(clip_duration_secs),
                scores,
            });
        }

        Ok(scored)
    }
}

/// Classify an inference failure.
///
/// Memory exhaustion is reported distinctly so operators can correlate it
/// with chunk-size and overlap settings; it is fatal for the file and never
/// retried in place.
fn inference_error(reason: &str) -> Error {
    let lower = reason.to_lowercase();
    if lower.contains("memory") || lower.contains("alloc") || lower.contains("exhaust") {
        Error::ResourceExhausted {
            reason: reason.to_string(),
        }
    } else {
        Error::Inference {
            reason: reason.to_string(),
        }
    }
}

fn select_device(builder: ClassifierBuilder, device: InferenceDevice) -> ClassifierBuilder {
    let available = available_execution_providers();
    debug!("Available execution providers: {available:?}");

    match device {
        InferenceDevice::Cpu => {
            info!("Requested device: CPU");
            builder
        }
        InferenceDevice::Auto => {
            if available.contains(&ExecutionProviderInfo::Cuda) {
                info!("Auto mode: CUDA available, attempting GPU");
                builder.execution_provider(CUDAExecutionProvider::default())
            } else {
                info!("Auto mode: no GPU provider available, using CPU");
                builder
            }
        }
        InferenceDevice::Gpu => {
            if available.contains(&ExecutionProviderInfo::Cuda) {
                info!("Requested device: CUDA");
                builder.execution_provider(CUDAExecutionProvider::default())
            } else {
                warn!("GPU requested but no GPU provider available, using CPU");
                builder
            }
        }
    }
}

fn count_labels(path: &Path) -> Result<usize> {
    let contents = std::fs::read_to_string(path)?;
    Ok(contents.lines().filter(|l| !l.trim().is_empty()).count())
}
