//! Streaming export of decoded licensee records
//!
//! Records are written one at a time so a batch pass never has to hold the
//! whole file in memory. Two layouts are supported: a JSON array and JSON
//! Lines (one object per line). Dates are ISO-8601 and nulls are preserved.

use crate::app::models::LicenseRecord;
use crate::{Error, Result};
use std::io::Write;
use std::str::FromStr;
use tracing::debug;

/// Output layout for exported records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// A single pretty-printed JSON array
    #[default]
    Json,
    /// One compact JSON object per line
    JsonLines,
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "jsonl" | "ndjson" | "json-lines" => Ok(ExportFormat::JsonLines),
            other => Err(Error::configuration(format!(
                "Unknown export format '{}' (expected json or jsonl)",
                other
            ))),
        }
    }
}

/// Incremental writer for licensee records
pub struct RecordExporter<W: Write> {
    writer: W,
    format: ExportFormat,
    records_written: usize,
}

impl<W: Write> RecordExporter<W> {
    /// Create an exporter and write any opening delimiter
    pub fn new(mut writer: W, format: ExportFormat) -> Result<Self> {
        if format == ExportFormat::Json {
            writer
                .write_all(b"[")
                .map_err(|e| Error::io("Failed to start JSON array", e))?;
        }

        Ok(Self {
            writer,
            format,
            records_written: 0,
        })
    }

    /// Write one record
    pub fn write_record(&mut self, record: &LicenseRecord) -> Result<()> {
        match self.format {
            ExportFormat::Json => {
                let separator: &[u8] = if self.records_written == 0 { b"\n" } else { b",\n" };
                self.writer
                    .write_all(separator)
                    .map_err(|e| Error::io("Failed to write record separator", e))?;
                serde_json::to_writer_pretty(&mut self.writer, record).map_err(|e| {
                    Error::serialization(
                        format!("Failed to serialize record {}", record.license_number),
                        e,
                    )
                })?;
            }
            ExportFormat::JsonLines => {
                serde_json::to_writer(&mut self.writer, record).map_err(|e| {
                    Error::serialization(
                        format!("Failed to serialize record {}", record.license_number),
                        e,
                    )
                })?;
                self.writer
                    .write_all(b"\n")
                    .map_err(|e| Error::io("Failed to write record terminator", e))?;
            }
        }

        self.records_written += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Write any closing delimiter, flush, and return the record count
    pub fn finish(mut self) -> Result<usize> {
        if self.format == ExportFormat::Json {
            let closing: &[u8] = if self.records_written == 0 { b"]\n" } else { b"\n]\n" };
            self.writer
                .write_all(closing)
                .map_err(|e| Error::io("Failed to close JSON array", e))?;
        }
        self.writer
            .flush()
            .map_err(|e| Error::io("Failed to flush exported records", e))?;

        debug!("Exported {} records as {:?}", self.records_written, self.format);
        Ok(self.records_written)
    }
}

/// Write a slice of records in one call
pub fn write_records<W: Write>(
    writer: W,
    records: &[LicenseRecord],
    format: ExportFormat,
) -> Result<usize> {
    let mut exporter = RecordExporter::new(writer, format)?;
    for record in records {
        exporter.write_record(record)?;
    }
    exporter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::fixed_width::decode_record;
    use crate::app::services::fixed_width::tests::RecordLineBuilder;
    use crate::constants::fields;

    fn sample_records() -> Vec<LicenseRecord> {
        let first = RecordLineBuilder::new()
            .set(fields::LOA_ISSUE_DATE, "01152020")
            .build();
        let second = RecordLineBuilder::new()
            .set(fields::LICENSE_NUMBER, "154123012B00077")
            .build();
        vec![
            decode_record(&first).unwrap().unwrap(),
            decode_record(&second).unwrap().unwrap(),
        ]
    }

    #[test]
    fn test_json_array_round_trips() {
        let records = sample_records();
        let mut buffer = Vec::new();
        let written = write_records(&mut buffer, &records, ExportFormat::Json).unwrap();
        assert_eq!(written, 2);

        let parsed: Vec<LicenseRecord> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed, records);

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value[0]["LOAIssueDate"], "2020-01-15");
        assert!(value[0]["LOAExpirationDate"].is_null());
    }

    #[test]
    fn test_json_lines_one_record_per_line() {
        let records = sample_records();
        let mut buffer = Vec::new();
        write_records(&mut buffer, &records, ExportFormat::JsonLines).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["LicenseNumber"], "154123012B00077");
        assert_eq!(second["Expiration"], "2B");
        assert_eq!(second["County"], 123);
    }

    #[test]
    fn test_empty_json_array_is_valid() {
        let mut buffer = Vec::new();
        write_records(&mut buffer, &[], ExportFormat::Json).unwrap();
        let parsed: Vec<LicenseRecord> = serde_json::from_slice(&buffer).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("JSONL".parse::<ExportFormat>().unwrap(), ExportFormat::JsonLines);
        assert!("csv".parse::<ExportFormat>().is_err());
    }
}
