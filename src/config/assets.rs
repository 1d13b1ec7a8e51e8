//! Model asset path resolution.

use crate::constants::assets;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Paths to the model files and parameter tables for one run.
#[derive(Debug, Clone)]
pub struct AssetPaths {
    /// Acoustic model file.
    pub model: PathBuf,
    /// Model label list.
    pub labels: PathBuf,
    /// Species name table.
    pub classes: PathBuf,
    /// Platt calibration table.
    pub calibration: PathBuf,
    /// Migration phenology table.
    pub migration: PathBuf,
    /// Gridded occurrence table.
    pub occurrence: PathBuf,
}

impl AssetPaths {
    /// Resolve asset paths under a directory and check that the files the
    /// run needs exist. The distribution tables are only required when the
    /// species distribution adjustment is enabled.
    pub fn from_dir(dir: &Path, include_sdm: bool) -> Result<Self> {
        let paths = Self {
            model: dir.join(assets::MODEL),
            labels: dir.join(assets::LABELS),
            classes: dir.join(assets::CLASSES),
            calibration: dir.join(assets::CALIBRATION),
            migration: dir.join(assets::MIGRATION),
            occurrence: dir.join(assets::OCCURRENCE),
        };

        let mut required = vec![&paths.model, &paths.labels, &paths.classes, &paths.calibration];
        if include_sdm {
            required.push(&paths.migration);
            required.push(&paths.occurrence);
        }

        for path in required {
            if !path.exists() {
                return Err(Error::AssetNotFound { path: path.clone() });
            }
        }

        Ok(paths)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) {
        std::fs::write(dir.path().join(name), "x").unwrap();
    }

    #[test]
    fn test_missing_model_is_reported() {
        let dir = TempDir::new().unwrap();
        let result = AssetPaths::from_dir(dir.path(), false);
        assert!(matches!(result, Err(Error::AssetNotFound { .. })));
    }

    #[test]
    fn test_sdm_tables_not_required_without_sdm() {
        let dir = TempDir::new().unwrap();
        touch(&dir, assets::MODEL);
        touch(&dir, assets::LABELS);
        touch(&dir, assets::CLASSES);
        touch(&dir, assets::CALIBRATION);

        assert!(AssetPaths::from_dir(dir.path(), false).is_ok());
        assert!(matches!(
            AssetPaths::from_dir(dir.path(), true),
            Err(Error::AssetNotFound { .. })
        ));
    }
}
