//! Audio decoding, resampling, chunking and windowing.

mod chunker;
mod decode;
mod resample;
mod windower;

pub use chunker::{ChunkSpan, chunk_spans, span_samples};
pub use decode::{DecodedAudio, decode_audio_file};
pub use resample::resample;
pub use windower::{Segment, window_chunk};
