//! Field parsing utilities for fixed-width licensee records
//!
//! Helpers for slicing a field out of a raw record line and converting the
//! normalized text into dates, telephone numbers and addresses.

use super::zip_code::split_zip;
use crate::app::models::Address;
use crate::constants::{LOA_DATE_FORMAT, fields::Field};
use crate::{Error, Result};
use chrono::NaiveDate;
use std::borrow::Cow;
use tracing::debug;

/// Width of an MMDDYYYY date
const LOA_DATE_LENGTH: usize = 8;

/// Slice a field from a raw line and normalize it (trimmed, upper-cased)
///
/// The caller guarantees the line is long enough for the field.
pub fn field_text(line: &[u8], field: Field) -> String {
    decode_text(&line[field.range()]).trim().to_uppercase()
}

/// Decode field bytes as UTF-8, falling back to Latin-1 byte by byte
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    }
}

/// Parse an optional MMDDYYYY date field
///
/// Blank values are `None`; anything else that is not a valid MMDDYYYY date
/// is an [`Error::DateParsing`] naming the field.
pub fn parse_loa_date(field_name: &str, value: &str) -> Result<Option<NaiveDate>> {
    if value.is_empty() {
        return Ok(None);
    }

    if value.len() != LOA_DATE_LENGTH || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::date_parsing(field_name, value, None));
    }

    NaiveDate::parse_from_str(value, LOA_DATE_FORMAT)
        .map(Some)
        .map_err(|e| Error::date_parsing(field_name, value, Some(e)))
}

/// Parse the telephone field, defaulting to 0 when blank or not numeric
pub fn parse_telephone(value: &str) -> u64 {
    match value.parse::<u64>() {
        Ok(telephone) => telephone,
        Err(_) => {
            if !value.is_empty() {
                debug!("Non-numeric telephone '{}' defaulted to 0", value);
            }
            0
        }
    }
}

/// Build an address from its normalized street, city, state and zip fields
pub fn parse_address(street: String, city: String, state: String, zip: &str) -> Address {
    let zip = zip.replace('-', "");
    let (zip_code, zip_code_plus_four) = split_zip(&zip);

    Address {
        street,
        city,
        state,
        zip_code,
        zip_code_plus_four,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_latin1_fallback() {
        assert_eq!(decode_text(b"ACME"), "ACME");
        // 0xC9 is 'É' in Latin-1 and invalid on its own in UTF-8
        assert_eq!(decode_text(&[b'C', 0xC9, b'S']), "CÉS");
    }

    #[test]
    fn test_field_text_trims_and_uppercases() {
        let mut line = vec![b' '; 40];
        line[15..30].copy_from_slice(b"  acme arms    ");
        let field = Field {
            name: "LicenseName",
            offset: 15,
            width: 15,
        };
        assert_eq!(field_text(&line, field), "ACME ARMS");
    }

    #[test]
    fn test_parse_loa_date() {
        assert_eq!(
            parse_loa_date("LOAIssueDate", "01152020").unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 15)
        );
        assert_eq!(parse_loa_date("LOAIssueDate", "").unwrap(), None);

        let err = parse_loa_date("LOAIssueDate", "13012020").unwrap_err();
        assert!(matches!(err, Error::DateParsing { ref field, .. } if field == "LOAIssueDate"));

        // Right length, wrong content
        assert!(parse_loa_date("LOAExpirationDate", "2020-1-1").is_err());
        // Too short to be MMDDYYYY
        assert!(parse_loa_date("LOAExpirationDate", "1152020").is_err());
    }

    #[test]
    fn test_parse_telephone() {
        assert_eq!(parse_telephone("5551234567"), 5551234567);
        assert_eq!(parse_telephone(""), 0);
        assert_eq!(parse_telephone("ABCDEFGHIJ"), 0);
        assert_eq!(parse_telephone("555-1234"), 0);
    }

    #[test]
    fn test_parse_address_strips_dashes() {
        let address = parse_address(
            "1 MAIN ST".to_string(),
            "SPRINGFIELD".to_string(),
            "IL".to_string(),
            "62701-1234",
        );
        assert_eq!(address.zip_code, Some(62701));
        assert_eq!(address.zip_code_plus_four, Some(1234));
    }
}
