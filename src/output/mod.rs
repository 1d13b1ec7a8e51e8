//! Result and summary artifacts.

mod csv;
mod progress;
mod summary;
mod types;

pub use csv::write_results;
pub use progress::{create_chunk_progress, create_file_progress, finish_progress, inc_progress};
pub use summary::write_run_summary;
pub use types::{BatchSummary, Detection, FileOutcome};
