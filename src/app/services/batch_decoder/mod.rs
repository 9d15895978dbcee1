//! Batch decoder for downloaded licensee files
//!
//! Scans a whole eZ Check download one line at a time, handing each line to
//! the record decoder and isolating failures: a bad line is counted and
//! described in [`DecodeStats`] but never stops the pass.
//!
//! - [`decoder`] - Lazy line iterator over a seekable stream
//! - [`stats`] - Per-pass counters and failure details
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ezcheck::app::services::batch_decoder::BatchDecoder;
//!
//! # fn example() -> ezcheck::Result<()> {
//! let mut decoder = BatchDecoder::open(std::path::Path::new("ffldb-2024-01-01"))?;
//! for record in decoder.records() {
//!     println!("{}", record?.license_number);
//! }
//! println!("{}", decoder.stats().summary_line());
//! # Ok(())
//! # }
//! ```

pub mod decoder;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use decoder::{BatchDecoder, DecodeResult, LineOutcome, decode_all};
pub use stats::{DecodeStats, LineFailure};
