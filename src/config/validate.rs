//! Run configuration validation.
//!
//! Hard invariants reject the run before it starts; empirically risky but
//! legal settings (oversized chunks, heavy overlap) only warn, because the
//! resulting OOM kill is an operator decision to make, not ours.

use crate::config::RunConfig;
use crate::constants::{MAX_SAFE_CHUNK_SIZE_SECS, MAX_SAFE_OVERLAP_SECS, confidence};
use crate::error::{Error, Result};
use tracing::warn;

/// Validate run settings. Called once at run start.
pub fn validate_run_config(config: &RunConfig) -> Result<()> {
    if config.threshold <= confidence::MIN || config.threshold > confidence::MAX {
        return Err(Error::ConfigValidation {
            message: format!(
                "threshold must be in (0, 1], got {}",
                config.threshold
            ),
        });
    }

    if config.overlap < 0.0 {
        return Err(Error::ConfigValidation {
            message: format!("overlap must be non-negative, got {}", config.overlap),
        });
    }

    // The window step is clip_duration - overlap; it must stay positive.
    if config.overlap >= config.clip_duration {
        return Err(Error::ConfigValidation {
            message: format!(
                "overlap must be smaller than the clip duration ({} s), got {}",
                config.clip_duration, config.overlap
            ),
        });
    }

    if config.chunk_size == 0 {
        return Err(Error::ConfigValidation {
            message: "chunk size must be at least 1 second".to_string(),
        });
    }

    if config.chunk_size > MAX_SAFE_CHUNK_SIZE_SECS {
        warn!(
            "chunk size {} s exceeds the tested bound of {} s; the inference \
             runtime may be killed by the OS",
            config.chunk_size, MAX_SAFE_CHUNK_SIZE_SECS
        );
    }

    if config.overlap > MAX_SAFE_OVERLAP_SECS {
        warn!(
            "overlap {} s exceeds the tested bound of {} s; the inference \
             runtime may be killed by the OS",
            config.overlap, MAX_SAFE_OVERLAP_SECS
        );
    }

    Ok(())
}
