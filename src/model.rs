// src/model.rs

//! Package index data model
//!
//! These types are snapshots of index state at fetch time. They are shared
//! by the wire protocol and the on-disk metadata cache, which both use
//! hyphenated keys for multi-word fields.

use serde::{Deserialize, Serialize};

/// One package listed by the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Package {
    /// Unique name; also the cache key and the package directory name
    pub name: String,
    pub description: String,
    /// Version whose archive gets downloaded
    pub latest_version: String,
    /// Source repository URL. `None` is written as JSON `null`.
    pub repository: Option<String>,
    /// Last update, in seconds since the epoch
    pub updated_at: i64,
    /// Releases in index order
    pub releases: Vec<Release>,
}

impl Package {
    /// Filename of the archive for the latest version
    pub fn archive_name(&self) -> String {
        format!("{}-{}.tar", self.name, self.latest_version)
    }
}

/// One published version of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Release {
    pub version: String,
    pub downloads: u64,
    pub updated_at: i64,
}

/// A file extracted from a package archive
///
/// Content is classified by attempting a UTF-8 decode of the raw bytes.
/// This is a heuristic, not a declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum File {
    Text { name: String, content: String },
    Binary { name: String, content: Vec<u8> },
}

impl File {
    /// Classify raw bytes as text or binary
    pub fn from_bytes(name: String, bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(content) => Self::Text { name, content },
            Err(e) => Self::Binary {
                name,
                content: e.into_bytes(),
            },
        }
    }

    /// Path relative to the package root, `/`-separated
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::Binary { name, .. } => name,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text { content, .. } => content.as_bytes(),
            Self::Binary { content, .. } => content,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }
}
