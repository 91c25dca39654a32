//! CLI for the hotpush update fetcher.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hotpush_core::config;
use std::path::{Path, PathBuf};

use commands::{run_checksum, run_fetch, run_verify};

/// Top-level CLI for the hotpush update fetcher.
#[derive(Debug, Parser)]
#[command(name = "hotpush")]
#[command(about = "hotpush: download-and-verify engine for content updates", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every file of a manifest and verify its checksum.
    Fetch {
        /// Path to the manifest JSON (an array of {"file", "hash"} entries).
        manifest: PathBuf,

        /// Root URL on the server where the content files live.
        content_url: String,

        /// Directory to download into (defaults to the current directory).
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,

        /// Extra request header as "Name: value". May be repeated.
        #[arg(long = "header", value_name = "NAME: VALUE")]
        headers: Vec<String>,
    },

    /// Verify files on disk against a manifest.
    Verify {
        /// Path to the manifest JSON.
        manifest: PathBuf,

        /// Directory holding the files to check.
        dir: PathBuf,
    },

    /// Compute MD5 of a file (e.g. to build manifest entries).
    Checksum {
        /// Path to the file.
        path: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                manifest,
                content_url,
                download_dir,
                headers,
            } => {
                let download_dir = match download_dir {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                run_fetch(&cfg, &manifest, &content_url, &download_dir, &headers)?;
            }
            CliCommand::Verify { manifest, dir } => run_verify(&manifest, &dir)?,
            CliCommand::Checksum { path } => run_checksum(Path::new(&path))?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
