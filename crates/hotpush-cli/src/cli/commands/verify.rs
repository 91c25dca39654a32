//! `hotpush verify` – check files on disk against a manifest.

use anyhow::{bail, Context, Result};
use hotpush_core::checksum;
use hotpush_core::manifest;
use std::fs;
use std::path::Path;

/// Recompute the MD5 of every manifest entry below `dir` and report
/// mismatches and missing files. Fails if any entry does not check out.
pub fn run_verify(manifest_path: &Path, dir: &Path) -> Result<()> {
    let json = fs::read_to_string(manifest_path)
        .with_context(|| format!("read manifest {}", manifest_path.display()))?;
    let files = manifest::parse(&json)?;

    let mut bad = 0usize;
    for file in &files {
        let path = dir.join(&file.name);
        match checksum::md5_path(&path) {
            Ok(digest) if digest == file.hash => {}
            Ok(digest) => {
                println!("MISMATCH  {}  expected {}  got {}", file.name, file.hash, digest);
                bad += 1;
            }
            Err(e) => {
                println!("MISSING   {}  ({:#})", file.name, e);
                bad += 1;
            }
        }
    }

    if bad > 0 {
        bail!("{} of {} file(s) failed verification", bad, files.len());
    }
    println!("verified {} file(s)", files.len());
    Ok(())
}
