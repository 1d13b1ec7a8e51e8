//! File analysis pipeline and batch coordination.

mod coordinator;
mod processor;

pub use coordinator::{collect_audio_files, has_results, results_path_for, run_batch};
pub use processor::Analyzer;
