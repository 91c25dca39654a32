//! Progress reporting for file transfers.
//!
//! Reports are gated by a byte quantum so a fast transfer of a large file
//! does not flood the sink with one event per chunk.

/// Fractional progress of one file's transfer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressReport {
    /// Percent of the file downloaded so far, in `[0, 100]`.
    pub percent: f32,
}

/// Receives progress reports during a transfer.
///
/// Implemented for any `FnMut(ProgressReport)` closure; the embedding side is
/// expected to forward reports to its own event channel. Reports for one file
/// are delivered in order before the next file starts.
pub trait ProgressSink {
    fn on_progress(&mut self, report: ProgressReport);
}

impl<F: FnMut(ProgressReport)> ProgressSink for F {
    fn on_progress(&mut self, report: ProgressReport) {
        self(report)
    }
}

/// Byte counter that gates progress emission to threshold crossings.
///
/// Fed every received chunk; returns a report only when the running total
/// crosses the next threshold and the total size is known. Percentages never
/// decrease because the byte counter only grows.
#[derive(Debug)]
pub struct ProgressThrottle {
    quantum: u64,
    downloaded: u64,
    next_threshold: u64,
}

impl ProgressThrottle {
    /// A zero quantum is treated as one byte so the threshold always advances.
    pub fn new(quantum: u64) -> Self {
        let quantum = quantum.max(1);
        Self {
            quantum,
            downloaded: 0,
            next_threshold: quantum,
        }
    }

    /// Bytes recorded so far.
    pub fn downloaded(&self) -> u64 {
        self.downloaded
    }

    /// Records `chunk_len` received bytes.
    ///
    /// Returns a report when the running total crosses the next threshold;
    /// `None` while below it, or whenever `total_bytes` is unknown or zero
    /// (progress is suppressed entirely for such transfers, though the byte
    /// count still accumulates).
    pub fn advance(&mut self, chunk_len: u64, total_bytes: Option<u64>) -> Option<ProgressReport> {
        self.downloaded += chunk_len;
        let total = match total_bytes {
            Some(t) if t > 0 => t,
            _ => return None,
        };
        if self.downloaded < self.next_threshold {
            return None;
        }
        self.next_threshold += self.quantum;
        let percent = (self.downloaded as f64 / total as f64 * 100.0).min(100.0) as f32;
        Some(ProgressReport { percent })
    }
}
