//! data root resolution
//!
//! Resolution priority:
//! 1. --data-dir <path> flag (highest priority)
//! 2. $PHARMA_DATA_DIR env var
//! 3. `data_dir` in investigator.toml
//! 4. "mock_data" in the current directory (default)

use crate::cli::{Error, Result};
use crate::config::InvestigatorConfig;
use std::path::{Path, PathBuf};

/// Environment variable naming the data root
pub const DATA_DIR_ENV: &str = "PHARMA_DATA_DIR";
/// Fallback data root
pub const DEFAULT_DATA_DIR: &str = "mock_data";

/// Resolve the data root
///
/// An explicit flag must name an existing directory; the other sources are
/// checked later by [`verify_data_root`] when a command needs the data.
pub fn resolve_data_root(explicit: Option<&Path>, config: &InvestigatorConfig) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_dir() {
            return Err(Error::DataRoot(format!(
                "data directory '{}' does not exist",
                path.display()
            )));
        }
        return Ok(path.to_path_buf());
    }

    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    if let Some(dir) = &config.data_dir {
        return Ok(dir.clone());
    }

    Ok(PathBuf::from(DEFAULT_DATA_DIR))
}

/// Verify that the data root is a directory
pub fn verify_data_root(data_root: &Path) -> Result<()> {
    if !data_root.is_dir() {
        return Err(Error::DataRoot(format!(
            "data directory '{}' does not exist (set --data-dir or {})",
            data_root.display(),
            DATA_DIR_ENV
        )));
    }
    Ok(())
}
