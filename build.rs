// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common flag: refetch the package index
fn refresh_arg() -> Arg {
    Arg::new("refresh")
        .short('r')
        .long("refresh")
        .action(ArgAction::SetTrue)
        .help("Refetch the package index even if a cached copy exists")
}

fn build_cli() -> Command {
    Command::new("pack")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Pack Contributors")
        .about("Mirror a remote package index and its source archives locally")
        .subcommand_required(false)
        .arg(
            Arg::new("index_url")
                .long("index-url")
                .value_name("URL")
                .global(true)
                .help("Package index URL (env: PACK_INDEX_URL)"),
        )
        .arg(
            Arg::new("archive_url")
                .long("archive-url")
                .value_name("URL")
                .global(true)
                .help("Archive host URL (env: PACK_ARCHIVE_URL)"),
        )
        .subcommand(
            Command::new("sync")
                .about("Load the index and download every package's source files")
                .arg(refresh_arg())
                .arg(
                    Arg::new("redownload_all")
                        .long("redownload-all")
                        .action(ArgAction::SetTrue)
                        .help("Discard existing package directories and download them again"),
                )
                .arg(
                    Arg::new("no_write")
                        .long("no-write")
                        .action(ArgAction::SetTrue)
                        .help("Keep extracted files in memory only"),
                )
                .arg(
                    Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .action(ArgAction::SetTrue)
                        .help("Do not show progress"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List packages known to the index")
                .arg(refresh_arg()),
        )
        .subcommand(Command::new("dir").about("Print the cache directory and what it holds"))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=OUT_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = out_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("pack.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
