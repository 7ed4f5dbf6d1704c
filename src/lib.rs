// src/lib.rs

//! Pack: local mirror of a remote package index
//!
//! Fetches package metadata from the index, keeps it in a JSON cache file,
//! and materializes each package's source files from the archive host.
//!
//! # Architecture
//!
//! - `repository`: index and archive HTTP client behind a `Transport` seam
//! - `cache`: `packages.json` and the per-package directory store
//! - `archive`: nested tarball (`contents.tar.gz` inside a tar) extraction
//! - `pack`: the `Pack` session tying policy, cache and network together
//! - `progress`: structured progress events and sinks
//!
//! # Example
//!
//! ```no_run
//! use pack::{Options, Pack};
//!
//! let pack = Pack::load(Options::default())?;
//! let files = pack.download_all()?;
//! println!("{} packages on disk", files.len());
//! # Ok::<(), pack::Error>(())
//! ```

pub mod archive;
pub mod cache;
mod error;
pub mod model;
mod pack;
pub mod paths;
pub mod progress;
pub mod repository;

pub use archive::ExtractError;
pub use cache::PackageDiskStore;
pub use error::{Error, Result};
pub use model::{File, Package, Release};
pub use pack::{Options, Pack, PackageFiles};
pub use progress::{
    CallbackProgress, LogProgress, ProgressEvent, ProgressSink, SilentProgress, SkipReason, Stage,
};
pub use repository::{ArchiveFetch, HttpResponse, IndexClient, Transport};
