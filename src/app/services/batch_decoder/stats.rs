//! Decoding statistics for a batch pass
//!
//! Counters and per-line failure details accumulated while scanning a
//! licensee file. This is the summary handed back to callers in place of
//! process-wide logging.

use serde::{Deserialize, Serialize};

/// A record line that could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineFailure {
    /// 1-based line number, counted after the leading separator
    pub line_number: usize,

    /// Human-readable reason
    pub reason: String,
}

/// Cumulative statistics for one pass over a licensee file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodeStats {
    /// Lines read from the stream
    pub total_lines: usize,

    /// Lines decoded into records
    pub records_decoded: usize,

    /// Lines that were not record candidates (wrong length)
    pub lines_skipped: usize,

    /// Record candidates that failed to decode
    pub lines_failed: usize,

    /// Line numbers of skipped lines
    pub skipped_lines: Vec<usize>,

    /// Details of each failed line
    pub failures: Vec<LineFailure>,
}

impl DecodeStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines that had the length of a record
    pub fn candidate_records(&self) -> usize {
        self.records_decoded + self.lines_failed
    }

    /// Percentage of record candidates that decoded successfully
    pub fn success_rate(&self) -> f64 {
        let candidates = self.candidate_records();
        if candidates == 0 {
            0.0
        } else {
            (self.records_decoded as f64 / candidates as f64) * 100.0
        }
    }

    /// Whether every record candidate decoded
    pub fn is_clean(&self) -> bool {
        self.lines_failed == 0
    }

    pub(crate) fn record_success(&mut self) {
        self.total_lines += 1;
        self.records_decoded += 1;
    }

    pub(crate) fn record_skip(&mut self, line_number: usize) {
        self.total_lines += 1;
        self.lines_skipped += 1;
        self.skipped_lines.push(line_number);
    }

    pub(crate) fn record_failure(&mut self, line_number: usize, reason: impl Into<String>) {
        self.total_lines += 1;
        self.lines_failed += 1;
        self.failures.push(LineFailure {
            line_number,
            reason: reason.into(),
        });
    }

    /// One-line summary suitable for log output
    pub fn summary_line(&self) -> String {
        format!(
            "{} records decoded, {} lines skipped, {} lines failed ({:.1}% of candidates decoded)",
            self.records_decoded,
            self.lines_skipped,
            self.lines_failed,
            self.success_rate()
        )
    }
}
