//! Single-file fetch-and-verify: streaming GET, incremental MD5, progress.
//!
//! The response body is streamed straight to disk while the same bytes feed
//! an MD5 hasher, so no file is ever held whole in memory. The computed
//! digest is compared against the manifest hash once the transfer completes.

use md5::{Digest, Md5};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str;
use std::time::Duration;

use super::FetchOptions;
use crate::error::FetchError;
use crate::progress::{ProgressSink, ProgressThrottle};

/// Downloads `url` to `dest` and verifies the MD5 of the received bytes
/// against `expected_hash` (exact match on the lowercase hex digest).
///
/// Any pre-existing file at `dest` is removed first and the parent directory
/// chain is created, so every attempt starts from a truncated file. Progress
/// reports go to `sink` while the body streams in, at most one per
/// `opts.progress_quantum` bytes, and only when the server declared a content
/// length. A corrupted download is left on disk; the caller owns cleanup.
pub(super) fn download_one(
    url: &str,
    dest: &Path,
    expected_hash: &str,
    custom_headers: &HashMap<String, String>,
    sink: &mut dyn ProgressSink,
    opts: &FetchOptions,
) -> Result<(), FetchError> {
    tracing::debug!("downloading {} -> {}", url, dest.display());

    match fs::remove_file(dest) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(FetchError::Storage(e)),
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(FetchError::Storage)?;
    }
    let file = fs::File::create(dest).map_err(FetchError::Storage)?;

    let mut out = BufWriter::new(file);
    let mut hasher = Md5::new();
    let mut throttle = ProgressThrottle::new(opts.progress_quantum);
    // Content-Length of the final response; reset on every status line so an
    // intermediate redirect's length is never mistaken for the body length.
    let total_bytes: Cell<Option<u64>> = Cell::new(None);
    let write_error: RefCell<Option<std::io::Error>> = RefCell::new(None);

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(FetchError::Curl)?;
    easy.follow_location(true).map_err(FetchError::Curl)?;
    easy.max_redirections(10).map_err(FetchError::Curl)?;
    easy.connect_timeout(opts.connect_timeout)
        .map_err(FetchError::Curl)?;
    // Abort if throughput drops below 1 KiB/s for 60s; the hard timeout is a
    // safety net so a completely stuck transfer eventually fails.
    easy.low_speed_limit(1024).map_err(FetchError::Curl)?;
    easy.low_speed_time(Duration::from_secs(60))
        .map_err(FetchError::Curl)?;
    easy.timeout(opts.transfer_timeout).map_err(FetchError::Curl)?;

    let mut list = curl::easy::List::new();
    for (k, v) in custom_headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))
            .map_err(FetchError::Curl)?;
    }
    if !custom_headers.is_empty() {
        easy.http_headers(list).map_err(FetchError::Curl)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(line) = str::from_utf8(data) {
                    let line = line.trim();
                    if line.starts_with("HTTP/") {
                        total_bytes.set(None);
                    } else if let Some((name, value)) = line.split_once(':') {
                        if name.trim().eq_ignore_ascii_case("content-length") {
                            if let Ok(n) = value.trim().parse::<u64>() {
                                if n > 0 {
                                    total_bytes.set(Some(n));
                                }
                            }
                        }
                    }
                }
                true
            })
            .map_err(FetchError::Curl)?;
        transfer
            .write_function(|data| {
                if let Err(e) = out.write_all(data) {
                    write_error.borrow_mut().replace(e);
                    return Ok(0); // abort transfer
                }
                hasher.update(data);
                if let Some(report) = throttle.advance(data.len() as u64, total_bytes.get()) {
                    sink.on_progress(report);
                }
                Ok(data.len())
            })
            .map_err(FetchError::Curl)?;
        if let Err(e) = transfer.perform() {
            if e.is_write_error() {
                if let Some(io_err) = write_error.borrow_mut().take() {
                    return Err(FetchError::Storage(io_err));
                }
            }
            return Err(FetchError::Curl(e));
        }
    }

    let code = easy.response_code().map_err(FetchError::Curl)?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }

    out.flush().map_err(FetchError::Storage)?;

    let received = throttle.downloaded();
    if let Some(expected) = total_bytes.get() {
        if received != expected {
            return Err(FetchError::Partial { expected, received });
        }
    }

    let computed = hex::encode(hasher.finalize());
    if computed != expected_hash {
        return Err(FetchError::Corrupted {
            expected: expected_hash.to_string(),
            computed,
        });
    }

    tracing::debug!("verified {} ({} bytes)", dest.display(), received);
    Ok(())
}
