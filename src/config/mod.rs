//! Run configuration, site metadata and asset resolution.

mod assets;
mod metadata;
mod types;
mod validate;

pub use assets::AssetPaths;
pub use metadata::{SiteMetadata, load_site_metadata};
pub use types::{RunConfig, RunContext};
pub use validate::validate_run_config;
