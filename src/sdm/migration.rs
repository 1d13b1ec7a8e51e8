//! Migration phenology model.
//!
//! For migratory species the probability of presence at a site depends on
//! the day of year and the latitude: arrival and departure are modelled as
//! normal distributions whose means shift linearly with latitude. The
//! presence probability is the overlap of "has arrived" and "has not yet
//! departed".

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Phenology parameters for one species.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MigrationParams {
    /// Model class index this row belongs to.
    pub class_index: usize,
    /// Arrival day intercept.
    pub arrival_intercept: f64,
    /// Arrival day shift per degree of latitude.
    pub arrival_lat_slope: f64,
    /// Departure day intercept.
    pub departure_intercept: f64,
    /// Departure day shift per degree of latitude.
    pub departure_lat_slope: f64,
    /// Spread of the arrival window in days.
    pub arrival_spread: f64,
    /// Spread of the departure window in days.
    pub departure_spread: f64,
    /// First day of the window in which the seasonal occurrence map applies.
    pub season_start_day: f64,
    /// Last day of the window in which the seasonal occurrence map applies.
    pub season_end_day: f64,
}

impl MigrationParams {
    /// Probability that the species is present on `day` at `lat`.
    pub fn presence_probability(&self, day: f64, lat: f64) -> f64 {
        let arrived = normal_cdf(
            day,
            self.arrival_lat_slope.mul_add(lat, self.arrival_intercept),
            self.arrival_spread / 2.0,
        );
        let departed = normal_cdf(
            day,
            self.departure_lat_slope.mul_add(lat, self.departure_intercept),
            self.departure_spread / 2.0,
        );
        arrived.min(1.0 - departed)
    }

    /// Whether `day` falls inside the seasonal-map window. The window may
    /// wrap across the new year (e.g. start 300, end 60).
    pub fn in_seasonal_window(&self, day: f64) -> bool {
        if self.season_start_day < self.season_end_day {
            day >= self.season_start_day && day <= self.season_end_day
        } else if self.season_start_day > self.season_end_day {
            day >= self.season_start_day || day <= self.season_end_day
        } else {
            false
        }
    }
}

/// Migration parameters keyed by model class index.
#[derive(Debug, Clone, Default)]
pub struct MigrationTable {
    rows: Vec<Option<MigrationParams>>,
}

impl MigrationTable {
    /// Load parameters from a CSV file, one row per migratory species.
    pub fn from_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| Error::TableRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut rows: Vec<Option<MigrationParams>> = Vec::new();
        for record in reader.deserialize() {
            let row: MigrationParams = record.map_err(|e| Error::TableRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            if row.arrival_spread <= 0.0 || row.departure_spread <= 0.0 {
                return Err(Error::TableFormat {
                    path: path.to_path_buf(),
                    message: format!(
                        "class {}: arrival and departure spreads must be positive",
                        row.class_index
                    ),
                });
            }
            if row.class_index >= rows.len() {
                rows.resize(row.class_index + 1, None);
            }
            rows[row.class_index] = Some(row);
        }

        Ok(Self { rows })
    }

    /// Build a table from entries directly; used by tests.
    pub fn from_entries(entries: Vec<MigrationParams>) -> Self {
        let mut rows: Vec<Option<MigrationParams>> = Vec::new();
        for entry in entries {
            if entry.class_index >= rows.len() {
                rows.resize(entry.class_index + 1, None);
            }
            rows[entry.class_index] = Some(entry);
        }
        Self { rows }
    }

    /// Parameters for a class, if the species is covered by the table.
    pub fn get(&self, class_index: usize) -> Option<&MigrationParams> {
        self.rows.get(class_index).and_then(Option::as_ref)
    }
}

/// Standard normal CDF evaluated at `(x - mean) / sd`.
///
/// Uses the Abramowitz & Stegun 7.1.26 rational approximation of erf,
/// accurate to ~1.5e-7 which is far below the precision the phenology
/// parameters carry.
pub fn normal_cdf(x: f64, mean: f64, sd: f64) -> f64 {
    if sd <= 0.0 {
        return if x < mean { 0.0 } else { 1.0 };
    }
    let z = (x - mean) / (sd * std::f64::consts::SQRT_2);
    0.5 * (1.0 + erf(z))
}

fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;
    const P: f64 = 0.327_591_1;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / P.mul_add(x, 1.0);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    let y = 1.0 - poly * (-x * x).exp();

    sign * y
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn params() -> MigrationParams {
        MigrationParams {
            class_index: 2,
            arrival_intercept: 60.0,
            arrival_lat_slope: 1.0,
            departure_intercept: 240.0,
            departure_lat_slope: 0.5,
            arrival_spread: 20.0,
            departure_spread: 20.0,
            season_start_day: 100.0,
            season_end_day: 200.0,
        }
    }

    #[test]
    fn test_normal_cdf_at_mean_is_half() {
        assert!((normal_cdf(0.0, 0.0, 1.0) - 0.5).abs() < 1e-7);
    }

    #[test]
    fn test_normal_cdf_one_sd() {
        // Phi(1) = 0.8413447
        assert!((normal_cdf(1.0, 0.0, 1.0) - 0.841_344_7).abs() < 1e-5);
        assert!((normal_cdf(-1.0, 0.0, 1.0) - 0.158_655_3).abs() < 1e-5);
    }

    #[test]
    fn test_presence_peaks_between_arrival_and_departure() {
        let p = params();
        // At lat 60: arrival mean 120, departure mean 270.
        let mid = p.presence_probability(195.0, 60.0);
        let before = p.presence_probability(90.0, 60.0);
        let after = p.presence_probability(300.0, 60.0);
        assert!(mid > 0.99);
        assert!(before < 0.01);
        assert!(after < 0.01);
    }

    #[test]
    fn test_seasonal_window_plain() {
        let p = params();
        assert!(p.in_seasonal_window(150.0));
        assert!(!p.in_seasonal_window(250.0));
    }

    #[test]
    fn test_seasonal_window_wraps_new_year() {
        let mut p = params();
        p.season_start_day = 300.0;
        p.season_end_day = 60.0;
        assert!(p.in_seasonal_window(330.0));
        assert!(p.in_seasonal_window(30.0));
        assert!(!p.in_seasonal_window(150.0));
    }

    #[test]
    fn test_table_lookup_miss_for_uncovered_class() {
        let table = MigrationTable::from_entries(vec![params()]);
        assert!(table.get(2).is_some());
        assert!(table.get(0).is_none());
        assert!(table.get(99).is_none());
    }

    #[test]
    fn test_table_from_csv() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "class_index,arrival_intercept,arrival_lat_slope,departure_intercept,\
             departure_lat_slope,arrival_spread,departure_spread,season_start_day,season_end_day"
        )
        .unwrap();
        writeln!(file, "3,60.0,1.0,240.0,0.5,20.0,20.0,100.0,200.0").unwrap();

        let table = MigrationTable::from_csv(file.path()).unwrap();
        let row = table.get(3).unwrap();
        assert!((row.arrival_intercept - 60.0).abs() < f64::EPSILON);
        assert!(table.get(0).is_none());
    }

    #[test]
    fn test_non_positive_spread_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "class_index,arrival_intercept,arrival_lat_slope,departure_intercept,\
             departure_lat_slope,arrival_spread,departure_spread,season_start_day,season_end_day"
        )
        .unwrap();
        writeln!(file, "3,60.0,1.0,240.0,0.5,0.0,20.0,100.0,200.0").unwrap();

        let result = MigrationTable::from_csv(file.path());
        assert!(matches!(result, Err(Error::TableFormat { .. })));
    }
}
