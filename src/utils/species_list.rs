//! Species name table keyed by model class index.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Names for one model output class.
#[derive(Debug, Clone, Deserialize)]
pub struct Species {
    /// Scientific (Latin) name.
    #[serde(rename = "luomus_name")]
    pub scientific_name: String,
    /// Common name.
    #[serde(rename = "common_name")]
    pub common_name: String,
}

/// Species name table. Row order matches the model's class order.
#[derive(Debug, Clone)]
pub struct SpeciesList {
    species: Vec<Species>,
}

impl SpeciesList {
    /// Load the species table from a CSV file with `luomus_name` and
    /// `common_name` columns, one row per model class.
    pub fn from_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| Error::SpeciesTableRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut species = Vec::new();
        for row in reader.deserialize() {
            let entry: Species = row.map_err(|e| Error::SpeciesTableRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            species.push(entry);
        }

        Ok(Self { species })
    }

    /// Build a table from already-parsed entries. Used by tests and by
    /// callers that synthesize class lists.
    pub fn from_entries(species: Vec<Species>) -> Self {
        Self { species }
    }

    /// Names for a class index, if the index is known.
    pub fn get(&self, class_index: usize) -> Option<&Species> {
        self.species.get(class_index)
    }

    /// Number of classes in the table.
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}
