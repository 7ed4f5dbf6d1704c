// src/cli.rs
//! CLI definitions for pack
//!
//! Command implementations live in the `commands` module.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pack")]
#[command(author = "Pack Contributors")]
#[command(version)]
#[command(about = "Mirror a remote package index and its source archives locally", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub endpoints: EndpointArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Overrides for the remote endpoints
#[derive(Args, Debug, Clone)]
pub struct EndpointArgs {
    /// Package index URL
    #[arg(long, global = true, env = "PACK_INDEX_URL", value_name = "URL")]
    pub index_url: Option<String>,

    /// Archive host URL serving <name>-<version>.tar
    #[arg(long, global = true, env = "PACK_ARCHIVE_URL", value_name = "URL")]
    pub archive_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the index and download every package's source files
    Sync {
        /// Refetch the package index even if a cached copy exists
        #[arg(short, long)]
        refresh: bool,

        /// Discard existing package directories and download them again
        #[arg(long)]
        redownload_all: bool,

        /// Keep extracted files in memory only
        #[arg(long)]
        no_write: bool,

        /// Do not show progress
        #[arg(short, long)]
        quiet: bool,
    },

    /// List packages known to the index
    List {
        /// Refetch the package index even if a cached copy exists
        #[arg(short, long)]
        refresh: bool,
    },

    /// Print the cache directory and what it holds
    Dir,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sync_flags() {
        let cli = Cli::try_parse_from(["pack", "sync", "--refresh", "--redownload-all"]).unwrap();
        match cli.command {
            Some(Commands::Sync {
                refresh,
                redownload_all,
                no_write,
                quiet,
            }) => {
                assert!(refresh);
                assert!(redownload_all);
                assert!(!no_write);
                assert!(!quiet);
            }
            _ => panic!("expected sync"),
        }
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["pack"]).unwrap();
        assert!(cli.command.is_none());
    }
}
