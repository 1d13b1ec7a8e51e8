//! Species distribution model: migration phenology, occurrence grid and the
//! confidence adjuster built from them.

mod adjuster;
mod migration;
mod occurrence;

pub use adjuster::DistributionAdjuster;
pub use migration::{MigrationParams, MigrationTable, normal_cdf};
pub use occurrence::{GridOccurrence, OccurrenceLookup, SeasonMap};
