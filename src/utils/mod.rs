//! Shared utilities.

pub mod date;
pub mod species_list;

pub use species_list::{Species, SpeciesList};
