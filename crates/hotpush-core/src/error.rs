//! Per-file download error type.

use std::fmt;

/// Error from one file's fetch-and-verify pass.
///
/// Transport and storage problems are kept apart from integrity failures:
/// `Corrupted` means the transfer itself finished but the received content
/// hashes to something other than the manifest says, so it must not be
/// installed.
#[derive(Debug)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection refused, interrupted stream).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status.
    Http(u32),
    /// Transfer ended before the declared content length was received
    /// (e.g. server closed early).
    Partial { expected: u64, received: u64 },
    /// Disk/storage operation failed (directory creation, open, write, flush).
    Storage(std::io::Error),
    /// Downloaded bytes hash to something other than the manifest hash.
    Corrupted { expected: String, computed: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Curl(e) => write!(f, "{}", e),
            FetchError::Http(code) => write!(f, "HTTP {}", code),
            FetchError::Partial { expected, received } => {
                write!(f, "partial transfer: expected {} bytes, got {}", expected, received)
            }
            FetchError::Storage(e) => write!(f, "storage: {}", e),
            FetchError::Corrupted { expected, computed } => {
                write!(
                    f,
                    "file is corrupted: checksum {} doesn't match hash {} of the downloaded content",
                    expected, computed
                )
            }
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Curl(e) => Some(e),
            FetchError::Storage(e) => Some(e),
            FetchError::Http(_) | FetchError::Partial { .. } | FetchError::Corrupted { .. } => None,
        }
    }
}
