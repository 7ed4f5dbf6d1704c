// src/cache/metadata.rs

//! Metadata cache file (`packages.json`)
//!
//! A missing file is a normal cache miss. A file that exists but does not
//! parse is a hard error, never a silent fallback to the network.

use crate::error::{Error, Result};
use crate::model::Package;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// On-disk shape of the cache file
#[derive(Debug, Deserialize)]
struct CacheFile {
    packages: Vec<Package>,
}

#[derive(Serialize)]
struct CacheFileRef<'a> {
    packages: &'a [Package],
}

/// Whether a cache file is present under `root`
pub fn exists(root: &Path) -> bool {
    paths::metadata_file(root).is_file()
}

/// Load the cached package list, or `None` when no cache file exists
pub fn try_load(root: &Path) -> Result<Option<Vec<Package>>> {
    let path = paths::metadata_file(root);
    if !path.is_file() {
        debug!("No metadata cache at {}", path.display());
        return Ok(None);
    }

    let content = fs::read(&path).map_err(|source| Error::FileReadFailed {
        path: path.clone(),
        source,
    })?;
    let cache: CacheFile = serde_json::from_slice(&content).map_err(Error::CorruptCache)?;

    info!(
        "Loaded {} packages from {}",
        cache.packages.len(),
        path.display()
    );
    Ok(Some(cache.packages))
}

/// Write the package list, replacing any previous cache file
pub fn save(root: &Path, packages: &[Package]) -> Result<()> {
    fs::create_dir_all(root).map_err(|source| Error::DirectoryCreateFailed {
        path: root.to_path_buf(),
        source,
    })?;

    let path = paths::metadata_file(root);
    let content =
        serde_json::to_vec(&CacheFileRef { packages }).map_err(|e| Error::FileWriteFailed {
            path: path.clone(),
            source: e.into(),
        })?;
    fs::write(&path, content).map_err(|source| Error::FileWriteFailed {
        path: path.clone(),
        source,
    })?;

    info!("Saved {} packages to {}", packages.len(), path.display());
    Ok(())
}
