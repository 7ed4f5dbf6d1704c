// src/commands/dir.rs
//! Cache directory report

use anyhow::Result;
use pack::{cache::metadata, paths, PackageDiskStore};
use tracing::info;

/// Print the cache root, whether the index is cached, and stored packages
pub fn cmd_dir() -> Result<()> {
    let root = paths::cache_root()?;
    info!("Reporting cache directory {}", root.display());

    println!("{}", root.display());

    let index_state = if metadata::exists(&root) {
        "cached"
    } else {
        "not cached"
    };
    println!("  Index: {} ({})", paths::metadata_file(&root).display(), index_state);

    let stored = PackageDiskStore::new(&root).list()?;
    println!(
        "  Packages: {} ({} on disk)",
        paths::packages_dir(&root).display(),
        stored.len()
    );
    Ok(())
}
