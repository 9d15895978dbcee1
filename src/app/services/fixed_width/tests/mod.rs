//! Test utilities for the fixed-width decoder
//!
//! Provides a builder that lays field values out at their fixed offsets so
//! tests can describe record lines by field instead of by byte position.

use crate::constants::fields::{self, Field};


/// Builder for raw 324-byte licensee record lines
#[derive(Debug, Clone)]
pub struct RecordLineBuilder {
    values: Vec<(Field, Vec<u8>)>,
}

impl Default for RecordLineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordLineBuilder {
    /// Start from a typical licensee with no LOA dates
    pub fn new() -> Self {
        Self { values: Vec::new() }
            .set(fields::LICENSE_NUMBER, "908037015100042")
            .set(fields::LICENSE_NAME, "doe, john")
            .set(fields::BUSINESS_NAME, "acme arms llc")
            .set(fields::BUSINESS_STREET, "1 main st")
            .set(fields::BUSINESS_CITY, "springfield")
            .set(fields::BUSINESS_STATE, "il")
            .set(fields::BUSINESS_ZIP_CODE, "627011234")
            .set(fields::MAILING_STREET, "po box 7")
            .set(fields::MAILING_CITY, "springfield")
            .set(fields::MAILING_STATE, "il")
            .set(fields::MAILING_ZIP_CODE, "62702")
            .set(fields::TELEPHONE, "2175550100")
    }

    /// Set a field value (left-aligned and space-padded to the field width)
    pub fn set(self, field: Field, value: &str) -> Self {
        self.set_bytes(field, value.as_bytes())
    }

    /// Set a field to raw bytes
    pub fn set_bytes(mut self, field: Field, value: &[u8]) -> Self {
        self.values.retain(|(existing, _)| existing.name != field.name);
        self.values.push((field, value.to_vec()));
        self
    }

    /// Build the 324-byte line, including its newline terminator
    pub fn build(&self) -> Vec<u8> {
        let mut line = Vec::with_capacity(crate::constants::RECORD_LENGTH);
        for field in fields::ALL {
            let mut value = self
                .values
                .iter()
                .find(|(existing, _)| existing.name == field.name)
                .map(|(_, value)| value.clone())
                .unwrap_or_default();
            value.resize(field.width, b' ');
            line.extend_from_slice(&value);
        }
        line.push(b'\n');
        line
    }
}

/// Build a licensee file: leading separator followed by the given lines
pub fn build_file(lines: &[Vec<u8>]) -> Vec<u8> {
    let mut file = vec![b'\n'];
    for line in lines {
        file.extend_from_slice(line);
    }
    file
}

#[test]
fn test_builder_produces_record_length_lines() {
    let line = RecordLineBuilder::new().build();
    assert_eq!(line.len(), crate::constants::RECORD_LENGTH);
    assert_eq!(&line[..15], b"908037015100042");
    assert_eq!(line[323], b'\n');
}
