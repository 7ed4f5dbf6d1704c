// src/cache/store.rs

//! Per-package directory layout
//!
//! Extracted files live at `<root>/packages/<name>/<relative path>`.

use crate::archive::ExtractedFile;
use crate::error::{Error, Result};
use crate::paths;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Disk store for extracted package files
#[derive(Debug, Clone)]
pub struct PackageDiskStore {
    root: PathBuf,
}

impl PackageDiskStore {
    /// Create a store under a cache root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding one package's files
    ///
    /// The name must be a single plain path component, so a package can
    /// never address `packages/` itself or anything outside it.
    pub fn path(&self, name: &str) -> Result<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) if part == name => {
                Ok(paths::package_dir(&self.root, name))
            }
            _ => Err(Error::InvalidPackageName(name.to_string())),
        }
    }

    /// Whether a package directory is present; false for invalid names
    pub fn exists(&self, name: &str) -> bool {
        self.path(name).is_ok_and(|dir| dir.is_dir())
    }

    /// Remove a package directory and everything below it
    pub fn delete(&self, name: &str) -> Result<()> {
        let dir = self.path(name)?;
        debug!("Deleting {}", dir.display());
        fs::remove_dir_all(&dir).map_err(|source| Error::DirectoryDeleteFailed { path: dir, source })
    }

    /// Read every regular file of a package, sorted by relative path
    pub fn read_all(&self, name: &str) -> Result<Vec<ExtractedFile>> {
        let dir = self.path(name)?;
        let mut files = Vec::new();

        for entry in WalkDir::new(&dir).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::DirectoryReadFailed {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.clone()),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let content = fs::read(path).map_err(|source| Error::FileReadFailed {
                path: path.to_path_buf(),
                source,
            })?;
            files.push((relative_name(&dir, path), content));
        }

        files.sort_by(|a, b| a.0.cmp(&b.0));
        debug!("Read {} files for {} from disk", files.len(), name);
        Ok(files)
    }

    /// Write files for a package, creating parent directories and overwriting
    pub fn write_all(&self, name: &str, files: &[ExtractedFile]) -> Result<()> {
        let dir = self.path(name)?;
        for (relative, content) in files {
            let path = dir.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreateFailed {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::write(&path, content).map_err(|source| Error::FileWriteFailed { path, source })?;
        }

        debug!("Wrote {} files to {}", files.len(), dir.display());
        Ok(())
    }

    /// Names of all packages currently stored on disk, sorted
    pub fn list(&self) -> Result<Vec<String>> {
        let dir = paths::packages_dir(&self.root);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let read_failed = |source: std::io::Error| Error::DirectoryReadFailed {
            path: dir.clone(),
            source,
        };
        let mut names = Vec::new();
        for entry in fs::read_dir(&dir).map_err(read_failed)? {
            let entry = entry.map_err(read_failed)?;
            if entry.file_type().map_err(read_failed)?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// `/`-separated path of `path` relative to `base`
fn relative_name(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
