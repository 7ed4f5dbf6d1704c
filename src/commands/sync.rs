// src/commands/sync.rs
//! Index loading and package sync commands

use super::index_client;
use super::progress::BarProgress;
use crate::cli::EndpointArgs;
use anyhow::Result;
use chrono::DateTime;
use pack::{File, Options, Pack, ProgressSink, SilentProgress};
use std::sync::Arc;
use tracing::info;

/// Flags accepted by `pack sync`
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncArgs {
    pub refresh: bool,
    pub redownload_all: bool,
    pub no_write: bool,
    pub quiet: bool,
}

impl SyncArgs {
    fn options(&self) -> Options {
        Options {
            refresh_package_list: self.refresh,
            read_packages_from_disc: !self.redownload_all,
            write_packages_to_disc: !self.no_write,
            print_logs: !self.quiet,
            ..Options::default()
        }
    }
}

fn progress_sink(options: &Options) -> Arc<dyn ProgressSink> {
    if options.print_logs {
        Arc::new(BarProgress::new())
    } else {
        Arc::new(SilentProgress)
    }
}

/// Attach context, pointing at the endpoints when the remote side failed
fn describe(err: pack::Error, action: &str) -> anyhow::Error {
    let message = if err.is_remote() {
        format!("{} (check the network or --index-url / --archive-url)", action)
    } else {
        action.to_string()
    };
    anyhow::Error::new(err).context(message)
}

fn load(endpoints: &EndpointArgs, options: Options) -> Result<Pack> {
    let root = pack::paths::cache_root()?;
    let client = index_client(endpoints)?;
    Pack::load_in(root, options, client, progress_sink(&options))
        .map_err(|e| describe(e, "Failed to load package index"))
}

/// Load the index and materialize every package
pub fn cmd_sync(endpoints: &EndpointArgs, args: SyncArgs) -> Result<()> {
    let options = args.options();
    info!("Synchronizing packages with {:?}", options);

    let pack = load(endpoints, options)?;
    let files = pack
        .download_all()
        .map_err(|e| describe(e, "Failed to synchronize packages"))?;

    let (text, binary) = files
        .values()
        .flatten()
        .fold((0usize, 0usize), |(text, binary), file| match file {
            File::Text { .. } => (text + 1, binary),
            File::Binary { .. } => (text, binary + 1),
        });
    let skipped = pack.packages().len() - files.len();

    println!("Synchronized {} packages", files.len());
    println!("  Text files: {}", text);
    println!("  Binary files: {}", binary);
    if skipped > 0 {
        println!("  Missing on archive host: {}", skipped);
    }
    if args.no_write {
        println!("  Files were not written to disk");
    } else {
        println!("  Location: {}", pack::paths::packages_dir(pack.root()).display());
    }
    Ok(())
}

/// Print every package with its latest version and update date
pub fn cmd_list(endpoints: &EndpointArgs, refresh: bool) -> Result<()> {
    let options = Options {
        refresh_package_list: refresh,
        print_logs: true,
        ..Options::default()
    };
    let pack = load(endpoints, options)?;

    if pack.packages().is_empty() {
        println!("No packages in index");
        return Ok(());
    }

    let mut packages: Vec<_> = pack.packages().iter().collect();
    packages.sort_by(|a, b| a.name.cmp(&b.name));

    println!("{} packages:", packages.len());
    for pkg in packages {
        println!(
            "  {} {} (updated {})",
            pkg.name,
            pkg.latest_version,
            format_timestamp(pkg.updated_at)
        );
        if !pkg.description.is_empty() {
            println!("      {}", pkg.description);
        }
    }
    Ok(())
}

/// Render epoch seconds as a UTC date
fn format_timestamp(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| secs.to_string())
}
