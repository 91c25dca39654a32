//! Source URL and destination path resolution for manifest entries.
//!
//! A manifest name is a relative path like `scripts/app.js`; it is joined
//! onto the content base URL and mirrored below the local download folder.
//! Names that would escape the download folder are rejected before any
//! request is made.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use url::Url;

/// Fully resolved source and destination for one manifest entry.
#[derive(Debug, Clone)]
pub struct DownloadTarget {
    /// Absolute URL the file is fetched from.
    pub source_url: Url,
    /// Local path the file is written to.
    pub destination: PathBuf,
}

/// Joins `name` onto the content base URL and the download folder.
pub fn resolve(content_url: &str, download_dir: &Path, name: &str) -> Result<DownloadTarget> {
    validate_name(name)?;
    let source_url = join_url(content_url, name)?;
    let mut destination = download_dir.to_path_buf();
    for part in name.split('/') {
        destination.push(part);
    }
    Ok(DownloadTarget {
        source_url,
        destination,
    })
}

/// A manifest name must be a clean relative path: non-empty, no leading
/// slash, and no empty, `.` or `..` components.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("empty manifest name");
    }
    if name.starts_with('/') {
        bail!("absolute manifest name: {}", name);
    }
    for part in name.split('/') {
        if part.is_empty() || part == "." || part == ".." {
            bail!("unsafe manifest name: {}", name);
        }
    }
    Ok(())
}

/// Joins a relative name onto the base URL without doubling slashes.
fn join_url(base: &str, name: &str) -> Result<Url> {
    let mut base = Url::parse(base).with_context(|| format!("invalid content URL {}", base))?;
    // Url::join resolves relative to the parent of the last path segment,
    // so the base path must end in a slash to keep its final segment.
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(name)
        .with_context(|| format!("manifest name {} does not join onto the content URL", name))
}
