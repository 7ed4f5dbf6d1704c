// src/cache/mod.rs

//! Local on-disk cache
//!
//! - `metadata`: the `packages.json` snapshot of the index
//! - `store`: extracted files, one directory per package

pub mod metadata;
mod store;

pub use store::PackageDiskStore;
