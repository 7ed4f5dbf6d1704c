// src/repository/metadata.rs

//! Index protocol envelopes
//!
//! Every index response wraps its payload in a `data` field.

use crate::model::Package;
use serde::{Deserialize, Serialize};

/// `GET <index>`: the list of package names
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexListing {
    pub data: Vec<IndexEntry>,
}

/// One row of the listing; other fields are ignored
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
}

/// `GET <index>/<name>`: full package metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct PackageResponse {
    pub data: Package,
}
