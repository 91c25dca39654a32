//! `hotpush fetch` – download and verify a manifest of files.

use anyhow::{bail, Context, Result};
use hotpush_core::config::HotpushConfig;
use hotpush_core::downloader;
use hotpush_core::manifest;
use hotpush_core::progress::ProgressReport;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Splits a `Name: value` CLI header argument.
fn parse_header(raw: &str) -> Result<(String, String)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => bail!("invalid header {:?}, expected \"Name: value\"", raw),
    }
}

/// Load the manifest, merge standing and one-off headers, run the batch.
/// Headers given on the command line win over config.toml entries.
pub fn run_fetch(
    cfg: &HotpushConfig,
    manifest_path: &Path,
    content_url: &str,
    download_dir: &Path,
    cli_headers: &[String],
) -> Result<()> {
    let json = fs::read_to_string(manifest_path)
        .with_context(|| format!("read manifest {}", manifest_path.display()))?;
    let files = manifest::parse(&json)?;
    if files.is_empty() {
        println!("manifest is empty, nothing to download");
        return Ok(());
    }

    let mut headers: HashMap<String, String> = cfg.request_headers.clone();
    for raw in cli_headers {
        let (name, value) = parse_header(raw)?;
        headers.insert(name, value);
    }

    tracing::info!(
        "downloading {} file(s) to {}",
        files.len(),
        download_dir.display()
    );
    let mut sink = |report: ProgressReport| {
        print!("\r  {:.1}%  ", report.percent);
        let _ = std::io::stdout().flush();
    };
    downloader::download_files(
        download_dir,
        content_url,
        &files,
        &headers,
        &mut sink,
        &cfg.fetch_options(),
    )?;
    println!("\rdownloaded and verified {} file(s)", files.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_header_name_value() {
        assert_eq!(
            parse_header("Authorization: Bearer X").unwrap(),
            ("Authorization".to_string(), "Bearer X".to_string())
        );
        assert_eq!(
            parse_header("X-Token:abc").unwrap(),
            ("X-Token".to_string(), "abc".to_string())
        );
    }

    #[test]
    fn parse_header_keeps_colons_in_value() {
        assert_eq!(
            parse_header("X-Url: http://example.com/a").unwrap(),
            ("X-Url".to_string(), "http://example.com/a".to_string())
        );
    }

    #[test]
    fn parse_header_rejects_malformed() {
        assert!(parse_header("no colon here").is_err());
        assert!(parse_header(": empty name").is_err());
    }
}
