//! Per-species confidence calibration.
//!
//! The acoustic model's raw outputs are recalibrated with per-species Platt
//! coefficients fitted against validated observations:
//! `p' = sigmoid(intercept + slope * p)`. Classes without a coefficient row
//! pass through unchanged.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CalibrationRow {
    class_index: usize,
    intercept: f32,
    slope: f32,
}

/// Platt calibration coefficients keyed by model class index.
#[derive(Debug, Clone, Default)]
pub struct CalibrationTable {
    rows: Vec<Option<(f32, f32)>>,
}

impl CalibrationTable {
    /// Load coefficients from a CSV file with `class_index`, `intercept`
    /// and `slope` columns.
    pub fn from_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| Error::TableRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut rows: Vec<Option<(f32, f32)>> = Vec::new();
        for record in reader.deserialize() {
            let row: CalibrationRow = record.map_err(|e| Error::TableRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            if row.class_index >= rows.len() {
                rows.resize(row.class_index + 1, None);
            }
            rows[row.class_index] = Some((row.intercept, row.slope));
        }

        Ok(Self { rows })
    }

    /// A table with no coefficients; every class passes through.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Calibrate one confidence value.
    pub fn apply(&self, class_index: usize, raw: f32) -> f32 {
        match self.rows.get(class_index).copied().flatten() {
            Some((intercept, slope)) => sigmoid(slope.mul_add(raw, intercept)),
            None => raw,
        }
    }

    /// Calibrate a dense score vector in place.
    pub fn calibrate(&self, scores: &mut [f32]) {
        for (class_index, score) in scores.iter_mut().enumerate() {
            *score = self.apply(class_index, *score);
        }
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
