//! Manifest entries: the files that make up one content update.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One file of a content update: relative name plus expected content hash.
///
/// Mirrors one entry of the update manifest JSON:
/// `{"file": "scripts/app.js", "hash": "<md5 hex>"}`. The name doubles as the
/// URL suffix on the server and the relative path below the download folder,
/// so it is unique within a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFile {
    /// Relative path of the file below the content root, `/`-separated.
    #[serde(rename = "file")]
    pub name: String,
    /// Expected MD5 of the file content, lowercase hex.
    pub hash: String,
}

/// Parses a manifest JSON document (an array of file entries).
pub fn parse(json: &str) -> Result<Vec<ManifestFile>> {
    serde_json::from_str(json).context("malformed manifest JSON")
}
