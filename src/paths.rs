// src/paths.rs
//! Centralized path derivation for the local cache

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding the local data directory
pub const DATA_DIR_ENV: &str = "PACK_DATA_DIR";

/// Name of the cache root below the data directory
const CACHE_DIR_NAME: &str = "pack";

/// Resolve the cache root (`<data_dir>/pack`)
///
/// Uses `PACK_DATA_DIR` when set, otherwise the OS local data directory.
pub fn cache_root() -> Result<PathBuf> {
    let data_dir = std::env::var_os(DATA_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::data_local_dir)
        .ok_or(Error::NoSuitableDirectory)?;
    Ok(data_dir.join(CACHE_DIR_NAME))
}

/// Get the metadata cache file
pub fn metadata_file(root: &Path) -> PathBuf {
    root.join("packages.json")
}

/// Get the directory holding all extracted packages
pub fn packages_dir(root: &Path) -> PathBuf {
    root.join("packages")
}

/// Get the directory for one package
pub fn package_dir(root: &Path, name: &str) -> PathBuf {
    packages_dir(root).join(name)
}
