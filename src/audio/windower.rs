//! Splitting a chunk into overlapping model-input clips.
//!
//! Consecutive clips start `clip_dur - overlap` seconds apart. A final
//! clip shorter than the clip duration is zero-padded to full length, so
//! the clip count for a given chunk length is deterministic. The windower
//! performs no capacity checks; run-start validation owns those.

/// A clip-duration window inside a chunk, ready for inference.
#[derive(Debug, Clone)]
pub struct Segment {
    /// Start offset in seconds relative to the chunk start.
    pub offset_secs: f32,
    /// Audio samples, zero-padded to the full clip length.
    pub samples: Vec<f32>,
}

/// Split chunk samples into overlapping, zero-padded clips.
///
/// Clips start at `0, step, 2*step, ...` with `step = clip_dur - overlap`,
/// for every start that lies inside the chunk. Callers must have validated
/// `0 <= overlap < clip_dur`; a non-positive step yields no segments.
pub fn window_chunk(
    chunk: &[f32],
    sample_rate: u32,
    clip_dur_secs: f32,
    overlap_secs: f32,
) -> Vec<Segment> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let clip_samples = (clip_dur_secs * sample_rate as f32) as usize;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let step_samples = ((clip_dur_secs - overlap_secs) * sample_rate as f32) as usize;

    if step_samples == 0 || clip_samples == 0 {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut pos = 0;

    while pos < chunk.len() {
        let end = (pos + clip_samples).min(chunk.len());
        let mut samples = chunk[pos..end].to_vec();
        // Pad the final short clip with silence.
        samples.resize(clip_samples, 0.0);

        #[allow(clippy::cast_precision_loss)]
        let offset_secs = pos as f32 / sample_rate as f32;

        segments.push(Segment {
            offset_secs,
            samples,
        });

        pos += step_samples;
    }

    segments
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    const RATE: u32 = 48_000;

    fn silence(secs: f32) -> Vec<f32> {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let n = (secs * RATE as f32) as usize;
        vec![0.0; n]
    }

    #[test]
    fn test_segments_start_one_step_apart() {
        let segments = window_chunk(&silence(10.0), RATE, 3.0, 1.0);
        for pair in segments.windows(2) {
            assert_eq!(pair[1].offset_secs - pair[0].offset_secs, 2.0);
        }
    }

    #[test]
    fn test_no_overlap_tiles_the_chunk() {
        let segments = window_chunk(&silence(9.0), RATE, 3.0, 0.0);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].offset_secs, 0.0);
        assert_eq!(segments[1].offset_secs, 3.0);
        assert_eq!(segments[2].offset_secs, 6.0);
    }

    #[test]
    fn test_final_partial_clip_is_zero_padded() {
        // 7 s chunk, 3 s clips, 1 s overlap: starts 0, 2, 4, 6.
        // The clip at 6 covers only 1 s of real audio.
        let mut chunk = silence(7.0);
        for s in &mut chunk {
            *s = 0.5;
        }
        let segments = window_chunk(&chunk, RATE, 3.0, 1.0);
        assert_eq!(segments.len(), 4);

        let last = &segments[3];
        assert_eq!(last.offset_secs, 6.0);
        assert_eq!(last.samples.len(), 3 * RATE as usize);
        assert_eq!(last.samples[0], 0.5);
        // Padded region is silent.
        assert_eq!(last.samples[2 * RATE as usize], 0.0);
    }

    #[test]
    fn test_default_chunk_produces_deterministic_count() {
        // 600 s chunk with clip 3 s and overlap 1 s: starts 0, 2, ..., 598.
        let segments = window_chunk(&silence(600.0), RATE, 3.0, 1.0);
        assert_eq!(segments.len(), 300);
        assert_eq!(segments[0].offset_secs, 0.0);
        assert_eq!(segments[299].offset_secs, 598.0);
    }

    #[test]
    fn test_all_starts_lie_inside_the_chunk() {
        let len_secs = 13.0;
        let segments = window_chunk(&silence(len_secs), RATE, 3.0, 1.0);
        assert!(segments.iter().all(|s| s.offset_secs < len_secs));
    }

    #[test]
    fn test_non_positive_step_yields_nothing() {
        // overlap == clip_dur is rejected by validation; the windower
        // degrades to an empty sequence rather than looping forever.
        let segments = window_chunk(&silence(10.0), RATE, 3.0, 3.0);
        assert!(segments.is_empty());
    }

    #[test]
    fn test_empty_chunk_yields_nothing() {
        let segments = window_chunk(&[], RATE, 3.0, 1.0);
        assert!(segments.is_empty());
    }
}
