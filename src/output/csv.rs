//! Result CSV writer.
//!
//! One artifact per audio file, written in a single pass after aggregation
//! so an interrupted run never leaves a half-written or empty result behind
//! as if the file were done.

use crate::constants::confidence::DECIMAL_PLACES;
use crate::error::{Error, Result};
use crate::output::Detection;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the aggregated detections for one audio file.
pub fn write_results(path: &Path, detections: &[Detection]) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::ResultWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);

    write_rows(&mut writer, detections).map_err(|e| Error::ResultWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_rows<W: Write>(writer: &mut W, detections: &[Detection]) -> std::io::Result<()> {
    writeln!(writer, "Start (s),End (s),Scientific name,Common name,Confidence")?;

    for detection in detections {
        writeln!(
            writer,
            "{:.1},{:.1},{},{},{:.decimal$}",
            detection.start_secs,
            detection.end_secs,
            escape_csv(&detection.scientific_name),
            escape_csv(&detection.common_name),
            detection.confidence,
            decimal = DECIMAL_PLACES,
        )?;
    }

    writer.flush()
}

/// Escape a value for CSV output.
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
