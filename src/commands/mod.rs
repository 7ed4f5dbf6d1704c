// src/commands/mod.rs
//! Command handlers for the pack CLI

mod dir;
pub mod progress;
mod sync;

pub use dir::cmd_dir;
pub use sync::{cmd_list, cmd_sync, SyncArgs};

use crate::cli::EndpointArgs;
use anyhow::{Context, Result};
use pack::IndexClient;

/// Build an index client honoring endpoint overrides
pub(crate) fn index_client(endpoints: &EndpointArgs) -> Result<IndexClient> {
    let mut client = IndexClient::new().context("Failed to set up HTTP client")?;
    if let Some(url) = &endpoints.index_url {
        client = client.with_index_url(url);
    }
    if let Some(url) = &endpoints.archive_url {
        client = client.with_archive_url(url);
    }
    Ok(client)
}
