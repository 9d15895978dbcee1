//! Tests for batch decoding over in-memory streams

use crate::app::services::fixed_width::tests::{RecordLineBuilder, build_file};
use crate::constants::fields;
use std::io::Cursor;


/// A valid record line for the given identifier
pub fn record_line(license_number: &str) -> Vec<u8> {
    RecordLineBuilder::new()
        .set(fields::LICENSE_NUMBER, license_number)
        .build()
}

/// A record-length line whose LOA issue date is malformed
pub fn bad_date_line() -> Vec<u8> {
    RecordLineBuilder::new()
        .set(fields::LICENSE_NUMBER, "100000010100001")
        .set(fields::LOA_ISSUE_DATE, "99999999")
        .build()
}

/// Build an in-memory licensee file stream
pub fn file_stream(lines: &[Vec<u8>]) -> Cursor<Vec<u8>> {
    Cursor::new(build_file(lines))
}
