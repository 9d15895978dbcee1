//! Integration tests for decoding a downloaded licensee file
//!
//! Builds a small file on disk laid out like an eZ Check download (a leading
//! separator byte followed by 324-byte record lines) and decodes it through
//! the public API.

use chrono::NaiveDate;
use ezcheck::app::services::batch_decoder::decode_all;
use ezcheck::app::services::record_export::{ExportFormat, write_records};
use ezcheck::constants::fields::{self, Field};
use ezcheck::{BatchDecoder, Error, IdentifierValue, LineOutcome, decode_record};
use std::fs::File;
use std::io::Write;
use tempfile::NamedTempFile;

/// Lay out field values at their fixed offsets, with a trailing newline
fn record_line(values: &[(Field, &str)]) -> Vec<u8> {
    let mut line = Vec::new();
    for field in fields::ALL {
        let value = values
            .iter()
            .find(|(candidate, _)| candidate.name == field.name)
            .map(|(_, value)| *value)
            .unwrap_or("");
        line.extend_from_slice(format!("{:<width$}", value, width = field.width).as_bytes());
    }
    line.push(b'\n');
    line
}

fn dealer_line() -> Vec<u8> {
    record_line(&[
        (fields::LICENSE_NUMBER, "908037015100042"),
        (fields::LICENSE_NAME, "doe, john"),
        (fields::BUSINESS_NAME, "acme arms llc"),
        (fields::BUSINESS_STREET, "1 main st"),
        (fields::BUSINESS_CITY, "springfield"),
        (fields::BUSINESS_STATE, "il"),
        (fields::BUSINESS_ZIP_CODE, "627011234"),
        (fields::MAILING_STREET, "po box 7"),
        (fields::MAILING_CITY, "springfield"),
        (fields::MAILING_STATE, "il"),
        (fields::MAILING_ZIP_CODE, "62702"),
        (fields::TELEPHONE, "2175550100"),
        (fields::LOA_ISSUE_DATE, "01152020"),
        (fields::LOA_EXPIRATION_DATE, "01152025"),
    ])
}

fn collector_line() -> Vec<u8> {
    record_line(&[
        (fields::LICENSE_NUMBER, "154123033C00077"),
        (fields::LICENSE_NAME, "roe, jane"),
        (fields::BUSINESS_ZIP_CODE, "99501"),
        (fields::TELEPHONE, "unlisted"),
    ])
}

fn write_licensee_file(lines: &[Vec<u8>]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"\n").unwrap();
    for line in lines {
        file.write_all(line).unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_decode_file_with_mixed_lines() {
    let bad_date = record_line(&[
        (fields::LICENSE_NUMBER, "100000010100001"),
        (fields::LOA_ISSUE_DATE, "13452020"),
    ]);
    let file = write_licensee_file(&[
        dealer_line(),
        b"Total records: 3\n".to_vec(),
        bad_date,
        collector_line(),
    ]);

    let result = decode_all(File::open(file.path()).unwrap()).unwrap();

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.stats.total_lines, 4);
    assert_eq!(result.stats.lines_skipped, 1);
    assert_eq!(result.stats.skipped_lines, vec![2]);
    assert_eq!(result.stats.lines_failed, 1);
    assert_eq!(result.stats.failures[0].line_number, 3);
    assert!(result.stats.failures[0].reason.contains("LOAIssueDate"));

    let dealer = &result.records[0];
    assert_eq!(dealer.license_number, "908037015100042");
    assert_eq!(dealer.identifier.district, IdentifierValue::Integer(8));
    assert_eq!(dealer.identifier.expiration, "51");
    assert_eq!(dealer.license_name, "DOE, JOHN");
    assert_eq!(dealer.business_address.zip_code, Some(62701));
    assert_eq!(dealer.business_address.zip_code_plus_four, Some(1234));
    assert_eq!(dealer.mailing_address.zip_code_plus_four, None);
    assert_eq!(dealer.telephone, 2175550100);
    assert_eq!(
        dealer.loa_issue_date,
        NaiveDate::from_ymd_opt(2020, 1, 15)
    );

    let collector = &result.records[1];
    assert_eq!(collector.identifier.expiration, "3C");
    assert_eq!(collector.telephone, 0);
    assert_eq!(collector.business_address.zip_code, Some(99501));
    assert!(!collector.has_loa());
}

#[test]
fn test_iterator_reports_every_line() {
    let file = write_licensee_file(&[dealer_line(), b"\n".to_vec(), collector_line()]);
    let mut decoder = BatchDecoder::open(file.path()).unwrap();

    let outcomes: Vec<LineOutcome> = decoder.by_ref().map(|outcome| outcome.unwrap()).collect();
    assert_eq!(outcomes.len(), 3);
    assert!(matches!(outcomes[0], LineOutcome::Record { line_number: 1, .. }));
    assert!(matches!(
        outcomes[1],
        LineOutcome::Skipped {
            line_number: 2,
            length: 1
        }
    ));
    assert!(matches!(outcomes[2], LineOutcome::Record { line_number: 3, .. }));
    assert!(decoder.stats().is_clean());
}

#[test]
fn test_empty_and_separator_only_files() {
    let empty = NamedTempFile::new().unwrap();
    let result = decode_all(File::open(empty.path()).unwrap()).unwrap();
    assert!(result.records.is_empty());
    assert_eq!(result.stats.total_lines, 0);

    let separator_only = write_licensee_file(&[]);
    let result = decode_all(File::open(separator_only.path()).unwrap()).unwrap();
    assert!(result.records.is_empty());
    assert_eq!(result.stats.total_lines, 0);
}

#[test]
fn test_single_line_decode_errors() {
    let line = record_line(&[
        (fields::LICENSE_NUMBER, "908037015100042"),
        (fields::LOA_EXPIRATION_DATE, "2020-1-1"),
    ]);
    let err = decode_record(&line).unwrap_err();
    assert!(matches!(err, Error::DateParsing { .. }));

    assert!(decode_record(b"too short\n").unwrap().is_none());
}

#[test]
fn test_decoded_records_export_as_json_lines() {
    let file = write_licensee_file(&[dealer_line(), collector_line()]);
    let result = decode_all(File::open(file.path()).unwrap()).unwrap();

    let mut buffer = Vec::new();
    write_records(&mut buffer, &result.records, ExportFormat::JsonLines).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    let first: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
    assert_eq!(first["LicenseNumber"], "908037015100042");
    assert_eq!(first["Region"], 9);
    assert_eq!(first["LOAExpirationDate"], "2025-01-15");
    assert_eq!(first["BusinessAddress"]["ZipCodePlusFour"], 1234);
}
