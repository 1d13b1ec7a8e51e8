//! Gridded species occurrence lookup.
//!
//! Occurrence probabilities come from atlas survey data rasterised onto a
//! regular latitude/longitude grid. Two maps exist per species: the primary
//! map covers most of the year, the secondary map covers the seasonal window
//! defined in the migration parameters (wintering vs. breeding range).

use crate::constants::sdm::GRID_CELL_DEG;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Which of the two occurrence maps to consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonMap {
    /// Default map, used outside the species' seasonal window.
    Primary,
    /// Seasonal map, used inside the window.
    Secondary,
}

/// Site-occurrence source for the distribution adjuster.
///
/// Coordinates are decimal degrees. `None` means the species/site pair is
/// not covered by the data, which the adjuster treats as "no evidence
/// against" rather than absence.
pub trait OccurrenceLookup: Send + Sync {
    /// Occurrence probability in [0, 1] for a species at a site.
    fn probability(&self, class_index: usize, lat: f64, lon: f64, map: SeasonMap) -> Option<f64>;
}

#[derive(Debug, Deserialize)]
struct OccurrenceRow {
    class_index: usize,
    lat: f64,
    lon: f64,
    p_primary: f64,
    p_secondary: f64,
}

/// Occurrence probabilities on a regular 0.1-degree grid.
///
/// Sites are snapped to the nearest grid cell, so any coordinate within the
/// covered area resolves to a value.
#[derive(Debug, Default)]
pub struct GridOccurrence {
    cells: HashMap<(usize, i32, i32), (f64, f64)>,
}

impl GridOccurrence {
    /// Load the grid from a CSV file with `class_index`, `lat`, `lon`,
    /// `p_primary` and `p_secondary` columns.
    pub fn from_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| Error::TableRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut cells = HashMap::new();
        for record in reader.deserialize() {
            let row: OccurrenceRow = record.map_err(|e| Error::TableRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            cells.insert(
                (row.class_index, cell_index(row.lat), cell_index(row.lon)),
                (row.p_primary, row.p_secondary),
            );
        }

        Ok(Self { cells })
    }

    /// Build a grid from explicit cell entries; used by tests.
    pub fn from_cells(entries: Vec<(usize, f64, f64, f64, f64)>) -> Self {
        let mut cells = HashMap::new();
        for (class_index, lat, lon, primary, secondary) in entries {
            cells.insert(
                (class_index, cell_index(lat), cell_index(lon)),
                (primary, secondary),
            );
        }
        Self { cells }
    }
}

impl OccurrenceLookup for GridOccurrence {
    fn probability(&self, class_index: usize, lat: f64, lon: f64, map: SeasonMap) -> Option<f64> {
        self.cells
            .get(&(class_index, cell_index(lat), cell_index(lon)))
            .map(|&(primary, secondary)| match map {
                SeasonMap::Primary => primary,
                SeasonMap::Secondary => secondary,
            })
    }
}

/// Snap a coordinate to its grid cell index.
fn cell_index(coord: f64) -> i32 {
    #[allow(clippy::cast_possible_truncation)]
    {
        (coord / GRID_CELL_DEG).round() as i32
    }
}
