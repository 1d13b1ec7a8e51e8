//! Per-directory metadata descriptor.
//!
//! Directory mode expects a `metadata.toml` next to the audio files:
//!
//! ```toml
//! lat = 60.1699
//! lon = 24.9384
//! day_of_year = 138   # optional
//! ```

use crate::constants::{MAX_DAY_OF_YEAR, METADATA_FILENAME};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Recording site metadata supplied with a directory of audio files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteMetadata {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Day of year (1-366). Optional; overridden per file by any date
    /// parsed from the audio file name.
    #[serde(default)]
    pub day_of_year: Option<u16>,
}

impl SiteMetadata {
    /// Check coordinate and day-of-year ranges.
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidLatitude { value: self.lat });
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(Error::InvalidLongitude { value: self.lon });
        }
        if let Some(day) = self.day_of_year
            && !(1..=MAX_DAY_OF_YEAR).contains(&day)
        {
            return Err(Error::InvalidDayOfYear { value: day });
        }
        Ok(())
    }
}

/// Load and validate the metadata descriptor for a target directory.
pub fn load_site_metadata(dir: &Path) -> Result<SiteMetadata> {
    let path = dir.join(METADATA_FILENAME);
    if !path.exists() {
        return Err(Error::MetadataMissing { path });
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| Error::MetadataRead {
        path: path.clone(),
        source: e,
    })?;

    let metadata: SiteMetadata = toml::from_str(&contents).map_err(|e| Error::MetadataParse {
        path: path.clone(),
        source: e,
    })?;

    metadata.validate()?;
    Ok(metadata)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_descriptor(dir: &TempDir, contents: &str) {
        std::fs::write(dir.path().join(METADATA_FILENAME), contents).unwrap();
    }

    #[test]
    fn test_load_valid_descriptor() {
        let dir = TempDir::new().unwrap();
        write_descriptor(&dir, "lat = 60.1699\nlon = 24.9384\nday_of_year = 138\n");

        let metadata = load_site_metadata(dir.path()).unwrap();
        assert!((metadata.lat - 60.1699).abs() < 1e-9);
        assert!((metadata.lon - 24.9384).abs() < 1e-9);
        assert_eq!(metadata.day_of_year, Some(138));
    }

    #[test]
    fn test_day_of_year_is_optional() {
        let dir = TempDir::new().unwrap();
        write_descriptor(&dir, "lat = -33.9\nlon = 151.2\n");

        let metadata = load_site_metadata(dir.path()).unwrap();
        assert_eq!(metadata.day_of_year, None);
    }

    #[test]
    fn test_missing_descriptor() {
        let dir = TempDir::new().unwrap();
        let result = load_site_metadata(dir.path());
        assert!(matches!(result, Err(Error::MetadataMissing { .. })));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let dir = TempDir::new().unwrap();
        write_descriptor(&dir, "lat = 60.0\nlon = 24.0\naltitude = 12\n");

        let result = load_site_metadata(dir.path());
        assert!(matches!(result, Err(Error::MetadataParse { .. })));
    }

    #[test]
    fn test_out_of_range_latitude_is_rejected() {
        let dir = TempDir::new().unwrap();
        write_descriptor(&dir, "lat = 95.0\nlon = 24.0\n");

        let result = load_site_metadata(dir.path());
        assert!(matches!(result, Err(Error::InvalidLatitude { .. })));
    }

    #[test]
    fn test_out_of_range_day_of_year_is_rejected() {
        let dir = TempDir::new().unwrap();
        write_descriptor(&dir, "lat = 60.0\nlon = 24.0\nday_of_year = 400\n");

        let result = load_site_metadata(dir.path());
        assert!(matches!(result, Err(Error::InvalidDayOfYear { .. })));
    }
}
