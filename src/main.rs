// src/main.rs

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Sync {
            refresh,
            redownload_all,
            no_write,
            quiet,
        }) => commands::cmd_sync(
            &cli.endpoints,
            commands::SyncArgs {
                refresh,
                redownload_all,
                no_write,
                quiet,
            },
        ),
        Some(Commands::List { refresh }) => commands::cmd_list(&cli.endpoints, refresh),
        Some(Commands::Dir) => commands::cmd_dir(),
        None => {
            // No command provided, show help
            println!("pack v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'pack --help' for usage information");
            Ok(())
        }
    }
}
