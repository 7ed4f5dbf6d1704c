// src/repository/mod.rs

//! Remote package index access
//!
//! This module provides functionality for:
//! - Listing packages and fetching their metadata from the index
//! - Downloading package archives from the archive host
//! - Abstracting the blocking HTTP transport

mod client;
mod metadata;
mod transport;

pub use client::{ArchiveFetch, IndexClient, DEFAULT_ARCHIVE_URL, DEFAULT_INDEX_URL};
pub use metadata::{IndexEntry, IndexListing, PackageResponse};
pub use transport::{HttpResponse, HttpTransport, Transport};
