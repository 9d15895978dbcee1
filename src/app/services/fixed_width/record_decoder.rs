//! Whole-line decoding of licensee records
//!
//! A record line is 323 bytes of fixed-width fields followed by a one-byte
//! terminator, 324 bytes in total. Lines of any other length are not record
//! candidates and decode to `None` so that scanners can step over blank and
//! header lines without treating them as failures.

use super::field_parsers::{field_text, parse_address, parse_loa_date, parse_telephone};
use super::identifier::{IdentifierRender, decode_identifier};
use crate::Result;
use crate::app::models::LicenseRecord;
use crate::constants::{RECORD_LENGTH, fields};
use tracing::trace;

/// Decode one raw line of the licensee file
///
/// Returns `Ok(None)` when the line is not exactly 324 bytes long. A
/// malformed LOA date or license identifier is an error for this line;
/// a malformed telephone silently becomes 0.
pub fn decode_record(line: impl AsRef<[u8]>) -> Result<Option<LicenseRecord>> {
    let line = line.as_ref();

    if line.len() != RECORD_LENGTH {
        trace!(
            "Line of {} bytes is not a record candidate (expected {})",
            line.len(),
            RECORD_LENGTH
        );
        return Ok(None);
    }

    let text = |field: fields::Field| field_text(line, field);

    let license_number = text(fields::LICENSE_NUMBER);

    let business_address = parse_address(
        text(fields::BUSINESS_STREET),
        text(fields::BUSINESS_CITY),
        text(fields::BUSINESS_STATE),
        &text(fields::BUSINESS_ZIP_CODE),
    );
    let mailing_address = parse_address(
        text(fields::MAILING_STREET),
        text(fields::MAILING_CITY),
        text(fields::MAILING_STATE),
        &text(fields::MAILING_ZIP_CODE),
    );

    let loa_issue_date = parse_loa_date(
        fields::LOA_ISSUE_DATE.name,
        &text(fields::LOA_ISSUE_DATE),
    )?;
    let loa_expiration_date = parse_loa_date(
        fields::LOA_EXPIRATION_DATE.name,
        &text(fields::LOA_EXPIRATION_DATE),
    )?;

    let identifier = decode_identifier(&license_number, IdentifierRender::Integer)?;
    let telephone = parse_telephone(&text(fields::TELEPHONE));

    Ok(Some(LicenseRecord {
        license_number,
        identifier,
        license_name: text(fields::LICENSE_NAME),
        business_name: text(fields::BUSINESS_NAME),
        business_address,
        mailing_address,
        telephone,
        loa_issue_date,
        loa_expiration_date,
    }))
}
