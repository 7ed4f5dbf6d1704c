// src/archive.rs

//! Nested package archive extraction
//!
//! Archives served by the archive host are uncompressed tarballs. The only
//! member of interest is `contents.tar.gz`, a gzip-compressed tarball that
//! holds the package sources. Everything else in the outer tarball
//! (VERSION, metadata.config, CHECKSUM) is ignored.

use flate2::read::GzDecoder;
use std::io::{self, Cursor, Read};
use std::path::{Component, Path};
use tar::Archive;
use thiserror::Error;
use tracing::debug;

/// Name of the nested source tarball inside the outer archive
pub const CONTENTS_MEMBER: &str = "contents.tar.gz";

/// Errors raised while decoding a nested archive
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to read outer tarball: {0}")]
    OuterArchive(#[source] io::Error),

    #[error("outer tarball has no contents.tar.gz member")]
    MissingContents,

    #[error("failed to decompress contents.tar.gz: {0}")]
    Decompress(#[source] io::Error),

    #[error("failed to read inner tarball: {0}")]
    InnerArchive(#[source] io::Error),

    #[error("inner tarball contains no files")]
    Empty,

    #[error("unsafe path in archive: {0}")]
    UnsafePath(String),
}

/// A file pulled out of the inner tarball: relative path and raw bytes
pub type ExtractedFile = (String, Vec<u8>);

/// Decode a nested archive into a flat list of files
///
/// Files come back in archive order with names relative to the package
/// root. An inner tarball without any regular file is an error, since a
/// published package always carries at least one source file.
pub fn extract(bytes: &[u8]) -> Result<Vec<ExtractedFile>, ExtractError> {
    let compressed = read_contents_member(bytes)?;

    let mut inner = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut inner)
        .map_err(ExtractError::Decompress)?;

    debug!(
        "Decompressed {} bytes -> {} bytes",
        compressed.len(),
        inner.len()
    );

    let files = read_inner_files(&inner)?;
    if files.is_empty() {
        return Err(ExtractError::Empty);
    }
    Ok(files)
}

/// Locate and materialize `contents.tar.gz` from the outer tarball
fn read_contents_member(bytes: &[u8]) -> Result<Vec<u8>, ExtractError> {
    let mut archive = Archive::new(Cursor::new(bytes));

    for entry in archive.entries().map_err(ExtractError::OuterArchive)? {
        let mut entry = entry.map_err(ExtractError::OuterArchive)?;
        let is_contents = entry
            .path()
            .map_err(ExtractError::OuterArchive)?
            .as_os_str()
            == CONTENTS_MEMBER;
        if !is_contents {
            continue;
        }

        let mut data = Vec::new();
        entry
            .read_to_end(&mut data)
            .map_err(ExtractError::OuterArchive)?;
        return Ok(data);
    }

    Err(ExtractError::MissingContents)
}

fn read_inner_files(bytes: &[u8]) -> Result<Vec<ExtractedFile>, ExtractError> {
    let mut archive = Archive::new(Cursor::new(bytes));
    let mut files = Vec::new();

    for entry in archive.entries().map_err(ExtractError::InnerArchive)? {
        let mut entry = entry.map_err(ExtractError::InnerArchive)?;

        // Directories, links and special files carry no content
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let name = relative_name(&entry.path().map_err(ExtractError::InnerArchive)?)?;
        let mut data = Vec::new();
        entry
            .read_to_end(&mut data)
            .map_err(ExtractError::InnerArchive)?;
        files.push((name, data));
    }

    Ok(files)
}

/// Normalize an archive path to a `/`-separated name relative to the package root
///
/// Leading `/` and `.` components are dropped; `..` is rejected.
pub fn relative_name(path: &Path) -> Result<String, ExtractError> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            Component::ParentDir => {
                return Err(ExtractError::UnsafePath(path.display().to_string()));
            }
        }
    }

    if parts.is_empty() {
        return Err(ExtractError::UnsafePath(path.display().to_string()));
    }
    Ok(parts.join("/"))
}
