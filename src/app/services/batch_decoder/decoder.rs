//! Lazy line-by-line decoding of a licensee file
//!
//! The download starts with a single separator byte, followed by newline
//! terminated record lines. The decoder probes the stream length up front,
//! skips the separator, and then yields one [`LineOutcome`] per line until
//! the end position is reached.

use super::stats::DecodeStats;
use crate::app::models::LicenseRecord;
use crate::app::services::fixed_width::decode_record;
use crate::constants::{LEADING_SEPARATOR_LENGTH, RECORD_FIELDS_LENGTH};
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, info};

/// What happened to one line of the file
#[derive(Debug)]
pub enum LineOutcome {
    /// The line decoded into a record
    Record {
        line_number: usize,
        record: Box<LicenseRecord>,
    },

    /// The line was not 324 bytes long and is not a record candidate
    Skipped { line_number: usize, length: usize },

    /// The line had record length but failed to decode
    Failed { line_number: usize, error: Error },
}

/// Records and statistics from a complete pass
#[derive(Debug, Clone)]
pub struct DecodeResult {
    pub records: Vec<LicenseRecord>,
    pub stats: DecodeStats,
}

/// Single-pass, lazy decoder over a readable and seekable stream
///
/// Iterating yields `Ok(LineOutcome)` for every line and `Err` only for I/O
/// failures, after which iteration stops. Statistics accumulate as lines
/// are consumed and are available through [`BatchDecoder::stats`].
pub struct BatchDecoder<R> {
    reader: BufReader<R>,
    position: u64,
    end: u64,
    line_number: usize,
    buffer: Vec<u8>,
    stats: DecodeStats,
    finished: bool,
}

impl BatchDecoder<File> {
    /// Open a downloaded licensee file for decoding
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
        Self::new(file)
    }
}

impl<R: Read + Seek> BatchDecoder<R> {
    /// Prepare a stream for decoding
    ///
    /// Determines the stream length by seeking to the end, then positions
    /// the stream just past the leading separator byte.
    pub fn new(mut reader: R) -> Result<Self> {
        let end = reader
            .seek(SeekFrom::End(0))
            .map_err(|e| Error::io("Failed to determine stream length", e))?;
        let start = LEADING_SEPARATOR_LENGTH.min(end);
        reader
            .seek(SeekFrom::Start(start))
            .map_err(|e| Error::io("Failed to skip leading separator", e))?;

        debug!("Decoding stream of {} bytes from offset {}", end, start);

        Ok(Self {
            reader: BufReader::new(reader),
            position: start,
            end,
            line_number: 0,
            buffer: Vec::with_capacity(crate::constants::RECORD_LENGTH),
            stats: DecodeStats::new(),
            finished: false,
        })
    }

    /// Total length of the underlying stream in bytes
    pub fn stream_length(&self) -> u64 {
        self.end
    }

    /// Current byte offset within the stream
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Statistics for the lines consumed so far
    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    /// Consume the decoder, returning its statistics
    pub fn into_stats(self) -> DecodeStats {
        self.stats
    }

    /// Iterate over decoded records only
    ///
    /// Skipped and failed lines are still counted in [`BatchDecoder::stats`].
    pub fn records(&mut self) -> impl Iterator<Item = Result<LicenseRecord>> + '_ {
        self.by_ref().filter_map(|outcome| match outcome {
            Ok(LineOutcome::Record { record, .. }) => Some(Ok(*record)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
    }

    fn classify(&mut self, line_number: usize) -> LineOutcome {
        match decode_record(&self.buffer) {
            Ok(Some(record)) => {
                self.stats.record_success();
                LineOutcome::Record {
                    line_number,
                    record: Box::new(record),
                }
            }
            Ok(None) => {
                debug!(
                    "Skipping line {} ({} bytes is not a record)",
                    line_number,
                    self.buffer.len()
                );
                self.stats.record_skip(line_number);
                LineOutcome::Skipped {
                    line_number,
                    length: self.buffer.len(),
                }
            }
            Err(error) => {
                let error = error.at_line(line_number);
                debug!("Failed to decode line {}: {}", line_number, error);
                self.stats.record_failure(line_number, error.to_string());
                LineOutcome::Failed { line_number, error }
            }
        }
    }
}

impl<R: Read + Seek> Iterator for BatchDecoder<R> {
    type Item = Result<LineOutcome>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.position >= self.end {
            return None;
        }

        self.buffer.clear();
        let read = match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => {
                self.finished = true;
                return None;
            }
            Ok(read) => read,
            Err(e) => {
                self.finished = true;
                return Some(Err(Error::io(
                    format!("Failed to read line {}", self.line_number + 1),
                    e,
                )));
            }
        };

        self.position += read as u64;
        self.line_number += 1;

        // The final record of a download may end without its terminator
        if self.buffer.len() == RECORD_FIELDS_LENGTH && self.buffer.last() != Some(&b'\n') {
            self.buffer.push(b'\n');
        }

        Some(Ok(self.classify(self.line_number)))
    }
}

/// Decode every line of a stream, collecting records and statistics
pub fn decode_all<R: Read + Seek>(reader: R) -> Result<DecodeResult> {
    let mut decoder = BatchDecoder::new(reader)?;
    let records = decoder.records().collect::<Result<Vec<_>>>()?;
    let stats = decoder.into_stats();

    info!("Decode pass complete: {}", stats.summary_line());

    Ok(DecodeResult { records, stats })
}
