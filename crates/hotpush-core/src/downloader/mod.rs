//! Batch download of manifest files with hash verification.
//!
//! Iterates the manifest entries in order, resolves each to a source URL and
//! a destination path, and downloads them one at a time. The first failure
//! aborts the whole batch; files downloaded before it stay on disk for the
//! caller to keep or clean up.

mod single;

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::manifest::ManifestFile;
use crate::progress::ProgressSink;
use crate::target;

/// Tunables for a batch of transfers.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    /// Bytes between two progress reports for one file.
    pub progress_quantum: u64,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Hard wall-clock limit for one file's transfer.
    pub transfer_timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            progress_quantum: 64 * 1024,
            connect_timeout: Duration::from_secs(30),
            transfer_timeout: Duration::from_secs(3600),
        }
    }
}

/// Downloads every manifest entry below `download_dir`, in manifest order.
///
/// Each entry's URL is `content_url` joined with the entry name, and its
/// destination mirrors the name below `download_dir` (subdirectories are
/// created as needed). Every request carries `custom_headers`. Processing is
/// strictly sequential; the first failing file aborts the batch, no requests
/// are issued for the entries after it, and the returned error names the file
/// over the per-file cause (a [`crate::error::FetchError`], downcastable).
pub fn download_files(
    download_dir: &Path,
    content_url: &str,
    files: &[ManifestFile],
    custom_headers: &HashMap<String, String>,
    sink: &mut dyn ProgressSink,
    opts: &FetchOptions,
) -> Result<()> {
    for file in files {
        let target = target::resolve(content_url, download_dir, &file.name)
            .with_context(|| format!("file {}", file.name))?;
        single::download_one(
            target.source_url.as_str(),
            &target.destination,
            &file.hash,
            custom_headers,
            sink,
            opts,
        )
        .map_err(anyhow::Error::new)
        .with_context(|| format!("file {}", file.name))?;
    }
    Ok(())
}
