//! Confidence adjustment from species distribution data.
//!
//! Combines the migration phenology and occurrence grid into a single
//! presence probability and folds it into the acoustic confidence as a
//! logarithmic penalty. A species that is implausible at this site and date
//! keeps a heavily damped confidence; a plausible one passes through almost
//! unchanged.

use crate::constants::{MIGRATION_DAY_CAP, sdm};
use crate::sdm::migration::MigrationTable;
use crate::sdm::occurrence::{OccurrenceLookup, SeasonMap};

/// Applies site and date plausibility to acoustic confidences.
pub struct DistributionAdjuster {
    migration: MigrationTable,
    occurrence: Box<dyn OccurrenceLookup>,
}

impl DistributionAdjuster {
    /// Combine a migration table with an occurrence source.
    pub fn new(migration: MigrationTable, occurrence: Box<dyn OccurrenceLookup>) -> Self {
        Self {
            migration,
            occurrence,
        }
    }

    /// Adjust one confidence value for a species at a site and date.
    ///
    /// Species without migration parameters (residents, noise classes) pass
    /// through unchanged. The result is clamped to [0, 1].
    pub fn adjust(
        &self,
        class_index: usize,
        confidence: f32,
        lat: f64,
        lon: f64,
        day_of_year: u16,
    ) -> f32 {
        let Some(params) = self.migration.get(class_index) else {
            return confidence;
        };

        // Leap day folds onto the last modelled day.
        let day = f64::from(day_of_year.min(MIGRATION_DAY_CAP));

        let p_migration = params.presence_probability(day, lat);

        // A site outside the grid carries no evidence against the species.
        let p_primary = self
            .occurrence
            .probability(class_index, lat, lon, SeasonMap::Primary)
            .unwrap_or(1.0);
        let p_secondary = if params.in_seasonal_window(day) {
            self.occurrence
                .probability(class_index, lat, lon, SeasonMap::Secondary)
                .unwrap_or(0.0)
        } else {
            0.0
        };

        let p_presence = p_migration * (1.0 - p_primary).mul_add(p_secondary, p_primary);

        let penalty = (p_presence.log10() + 1.0).clamp(sdm::PENALTY_FLOOR, 0.0);
        let weighted = sdm::PENALTY_WEIGHT * penalty;

        let adjusted = (f64::from(confidence) + weighted).max(0.0) / (1.0 + weighted).max(1e-4);

        #[allow(clippy::cast_possible_truncation)]
        {
            (adjusted as f32).clamp(0.0, 1.0)
        }
    }
}
