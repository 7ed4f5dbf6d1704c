// src/pack.rs

//! Synchronization session
//!
//! A [`Pack`] is created once by [`Pack::load`] and is read-only
//! afterwards. Loading resolves the package list (cache file or index);
//! [`Pack::download_all`] then materializes every package's files,
//! reusing, refreshing or skipping each one according to [`Options`].
//!
//! Both operations are fail-fast: the first hard error aborts the call and
//! nothing gathered so far is returned. An archive that is missing on the
//! host (HTTP 404) is the one benign case and only skips that package.

use crate::archive::{self, ExtractedFile};
use crate::cache::{metadata, PackageDiskStore};
use crate::error::{Error, Result};
use crate::model::{File, Package};
use crate::paths;
use crate::progress::{LogProgress, ProgressEvent, ProgressSink, SilentProgress, SkipReason, Stage};
use crate::repository::{ArchiveFetch, IndexClient};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Cache policy toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Persist fetched metadata. `load` always writes after a fetch, so this
    /// is informational.
    pub write_to_file: bool,
    /// Ignore the metadata cache file and refetch the index
    pub refresh_package_list: bool,
    /// Persist extracted files under the package directory
    pub write_packages_to_disc: bool,
    /// Reuse an existing package directory instead of downloading
    pub read_packages_from_disc: bool,
    /// Report progress. `Pack::load` logs through tracing; the CLI draws
    /// progress bars.
    pub print_logs: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            write_to_file: true,
            refresh_package_list: false,
            write_packages_to_disc: true,
            read_packages_from_disc: true,
            print_logs: false,
        }
    }
}

impl Options {
    /// Default sink for these options
    fn default_progress(&self) -> Arc<dyn ProgressSink> {
        if self.print_logs {
            Arc::new(LogProgress)
        } else {
            Arc::new(SilentProgress)
        }
    }
}

/// Package files grouped by package name
pub type PackageFiles = BTreeMap<String, Vec<File>>;

/// Loaded synchronization session
pub struct Pack {
    root: PathBuf,
    options: Options,
    packages: Vec<Package>,
    client: IndexClient,
    progress: Arc<dyn ProgressSink>,
}

impl std::fmt::Debug for Pack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pack")
            .field("root", &self.root)
            .field("options", &self.options)
            .field("packages", &self.packages.len())
            .field("index_url", &self.client.index_url())
            .finish()
    }
}

impl Pack {
    /// Load the package list under the OS data directory
    ///
    /// Uses the reqwest transport and default endpoints.
    pub fn load(options: Options) -> Result<Self> {
        let root = paths::cache_root()?;
        let client = IndexClient::new()?;
        let progress = options.default_progress();
        Self::load_in(root, options, client, progress)
    }

    /// Load the package list under an explicit cache root
    ///
    /// Reads `packages.json` unless a refresh is requested or the file is
    /// absent. Otherwise fetches the index and saves it; a failed save
    /// fails the whole load.
    pub fn load_in(
        root: impl Into<PathBuf>,
        options: Options,
        client: IndexClient,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Self> {
        let root = root.into();

        let cached = if options.refresh_package_list {
            debug!("Package list refresh requested, ignoring cache");
            None
        } else {
            metadata::try_load(&root)?
        };

        let packages = match cached {
            Some(packages) => packages,
            None => {
                let packages = client.fetch_index(progress.as_ref())?;
                metadata::save(&root, &packages)?;
                packages
            }
        };

        Ok(Self {
            root,
            options,
            packages,
            client,
            progress,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Disk store rooted at this session's cache root
    pub fn store(&self) -> PackageDiskStore {
        PackageDiskStore::new(&self.root)
    }

    /// Materialize the files of every package using the session's sink
    pub fn download_all(&self) -> Result<PackageFiles> {
        self.download_all_with(self.progress.as_ref())
    }

    /// Materialize the files of every package, reporting to `progress`
    ///
    /// Packages missing on the archive host produce no entry. Any other
    /// failure aborts the whole run.
    pub fn download_all_with(&self, progress: &dyn ProgressSink) -> Result<PackageFiles> {
        let store = self.store();
        let total = self.packages.len();
        progress.emit(ProgressEvent::Started {
            stage: Stage::Download,
            total,
        });

        let fetched = self.packages.iter().enumerate().try_fold(
            Vec::with_capacity(total),
            |mut acc, (i, package)| -> Result<Vec<(String, Vec<ExtractedFile>)>> {
                progress.emit(ProgressEvent::Progress {
                    stage: Stage::Download,
                    name: package.name.clone(),
                    current: i + 1,
                    total,
                });
                if let Some(files) = self.sync_package(&store, package, progress)? {
                    acc.push((package.name.clone(), files));
                }
                Ok(acc)
            },
        )?;

        progress.emit(ProgressEvent::Done {
            stage: Stage::Download,
        });
        info!("Synchronized {} of {} packages", fetched.len(), total);

        Ok(fetched
            .into_iter()
            .map(|(name, files)| {
                let files = files
                    .into_iter()
                    .map(|(path, bytes)| File::from_bytes(path, bytes))
                    .collect();
                (name, files)
            })
            .collect())
    }

    /// Decide between disk reuse, purge-and-download, or plain download
    fn sync_package(
        &self,
        store: &PackageDiskStore,
        package: &Package,
        progress: &dyn ProgressSink,
    ) -> Result<Option<Vec<ExtractedFile>>> {
        if store.path(&package.name)?.is_dir() {
            if self.options.read_packages_from_disc {
                debug!("Reusing {} from disk", package.name);
                return store.read_all(&package.name).map(Some);
            }
            debug!("Purging stale copy of {}", package.name);
            store.delete(&package.name)?;
        }
        self.download_and_extract(store, package, progress)
    }

    fn download_and_extract(
        &self,
        store: &PackageDiskStore,
        package: &Package,
        progress: &dyn ProgressSink,
    ) -> Result<Option<Vec<ExtractedFile>>> {
        let bytes = match self.client.fetch_archive(package)? {
            ArchiveFetch::Found(bytes) => bytes,
            ArchiveFetch::Missing => {
                progress.emit(ProgressEvent::Skipped {
                    name: package.name.clone(),
                    reason: SkipReason::MissingOnHost,
                });
                return Ok(None);
            }
        };

        let files = archive::extract(&bytes).map_err(|source| Error::CorruptArchive {
            package: package.name.clone(),
            source,
        })?;

        if self.options.write_packages_to_disc {
            store.write_all(&package.name, &files)?;
        }
        Ok(Some(files))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert!(!options.refresh_package_list);
        assert!(options.write_packages_to_disc);
        assert!(options.read_packages_from_disc);
        assert!(!options.print_logs);
    }
}
