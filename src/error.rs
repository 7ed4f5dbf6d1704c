// src/error.rs

//! Error types for the synchronization pipeline
//!
//! Every component returns [`Result`]; nothing here is retried internally.
//! The binary maps these to a message and a failing exit status.

use crate::archive::ExtractError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading the index or syncing packages
#[derive(Error, Debug)]
pub enum Error {
    /// No writable local data directory could be resolved
    #[error("no suitable local data directory found")]
    NoSuitableDirectory,

    #[error("failed to create directory {}: {source}", .path.display())]
    DirectoryCreateFailed { path: PathBuf, source: io::Error },

    #[error("failed to delete directory {}: {source}", .path.display())]
    DirectoryDeleteFailed { path: PathBuf, source: io::Error },

    #[error("failed to read directory {}: {source}", .path.display())]
    DirectoryReadFailed { path: PathBuf, source: io::Error },

    #[error("failed to read file {}: {source}", .path.display())]
    FileReadFailed { path: PathBuf, source: io::Error },

    #[error("failed to write file {}: {source}", .path.display())]
    FileWriteFailed { path: PathBuf, source: io::Error },

    /// Connection, TLS or timeout failure before a status was received
    #[error("request to {url} failed: {reason}")]
    RequestFailed { url: String, reason: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    /// Response JSON did not match the expected shape
    #[error("invalid response body from {url}: {source}")]
    InvalidResponseBody {
        url: String,
        source: serde_json::Error,
    },

    /// The metadata cache file exists but cannot be parsed
    #[error("corrupt package cache: {0}")]
    CorruptCache(#[source] serde_json::Error),

    #[error("corrupt archive for package '{package}': {source}")]
    CorruptArchive {
        package: String,
        source: ExtractError,
    },

    /// Package name is not a single plain path component
    #[error("invalid package name '{0}'")]
    InvalidPackageName(String),

    /// HTTP client could not be constructed
    #[error("failed to initialize HTTP client: {0}")]
    ClientInit(String),
}

impl Error {
    /// True for errors caused by the remote side rather than local disk state
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed { .. } | Self::UnexpectedStatus { .. } | Self::InvalidResponseBody { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_names_url() {
        let err = Error::UnexpectedStatus {
            url: "https://example.com/x.tar".to_string(),
            status: 500,
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("https://example.com/x.tar"));
        assert!(err.is_remote());
    }

    #[test]
    fn test_io_errors_are_local() {
        let err = Error::FileWriteFailed {
            path: PathBuf::from("/tmp/pack/packages.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!err.is_remote());
        assert!(err.to_string().contains("/tmp/pack/packages.json"));
    }
}
