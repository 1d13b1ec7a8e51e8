//! Splitting a recording into bounded-duration chunks.
//!
//! The acoustic model has a bounded input size, so long recordings are cut
//! into fixed-size chunks before inference. One chunk is one model call;
//! bounding the chunk size bounds peak memory. Chunk boundaries ignore the
//! clip overlap; the chunks partition `[0, duration)` exactly.

/// A contiguous sub-range of a recording's duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkSpan {
    /// Position of this chunk within the file, starting at 0.
    pub index: usize,
    /// Start offset in seconds from the beginning of the file.
    pub start_secs: f64,
    /// End offset in seconds (exclusive).
    pub end_secs: f64,
}

impl ChunkSpan {
    /// Length of this chunk in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// Split a file duration into ordered, non-overlapping chunk spans.
///
/// Spans are `[0,C), [C,2C), ...` with the final span truncated to
/// `duration mod C`. A zero-length span never occurs; a duration shorter
/// than one chunk yields a single span covering the whole file.
pub fn chunk_spans(duration_secs: f64, chunk_size_secs: u32) -> Vec<ChunkSpan> {
    let chunk_size = f64::from(chunk_size_secs);
    let mut spans = Vec::new();

    if duration_secs <= 0.0 || chunk_size <= 0.0 {
        return spans;
    }

    let mut start = 0.0;
    while start < duration_secs {
        let end = (start + chunk_size).min(duration_secs);
        spans.push(ChunkSpan {
            index: spans.len(),
            start_secs: start,
            end_secs: end,
        });
        start = end;
    }

    spans
}

/// Borrow the decoded samples covered by a chunk span.
pub fn span_samples<'a>(samples: &'a [f32], sample_rate: u32, span: &ChunkSpan) -> &'a [f32] {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let start = ((span.start_secs * f64::from(sample_rate)).round() as usize).min(samples.len());
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let end = ((span.end_secs * f64::from(sample_rate)).round() as usize).min(samples.len());
    &samples[start..end]
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_multiple_has_no_trailing_chunk() {
        let spans = chunk_spans(1200.0, 600);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].start_secs, 0.0);
        assert_eq!(spans[0].end_secs, 600.0);
        assert_eq!(spans[1].start_secs, 600.0);
        assert_eq!(spans[1].end_secs, 1200.0);
    }

    #[test]
    fn test_final_chunk_truncated() {
        let spans = chunk_spans(1450.0, 600);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[2].start_secs, 1200.0);
        assert_eq!(spans[2].end_secs, 1450.0);
        assert_eq!(spans[2].duration_secs(), 250.0);
    }

    #[test]
    fn test_short_file_single_chunk() {
        let spans = chunk_spans(42.5, 600);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].end_secs, 42.5);
    }

    #[test]
    fn test_ten_minute_file_default_chunk_size() {
        // 10 minute file with the 600 s default: exactly one chunk.
        let spans = chunk_spans(600.0, 600);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start_secs, 0.0);
        assert_eq!(spans[0].end_secs, 600.0);
    }

    #[test]
    fn test_spans_partition_duration_exactly() {
        let duration = 1234.56;
        let spans = chunk_spans(duration, 300);

        // Contiguous: each span starts where the previous ended.
        assert_eq!(spans[0].start_secs, 0.0);
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end_secs, pair[1].start_secs);
        }
        assert_eq!(spans.last().unwrap().end_secs, duration);

        // Never zero-length.
        assert!(spans.iter().all(|s| s.duration_secs() > 0.0));
    }

    #[test]
    fn test_zero_duration_yields_no_chunks() {
        assert!(chunk_spans(0.0, 600).is_empty());
    }

    #[test]
    fn test_span_samples_extracts_sub_range() {
        let samples: Vec<f32> = (0..100).map(|i| i as f32).collect();
        let spans = chunk_spans(10.0, 4);
        // 10 samples per second at rate 10.
        let middle = span_samples(&samples, 10, &spans[1]);
        assert_eq!(middle.len(), 40);
        assert_eq!(middle[0], 40.0);
    }
}
