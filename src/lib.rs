//! eZ Check Library
//!
//! A Rust library for retrieving the ATF Federal Firearms Licensee (FFL)
//! listing from the eZ Check service and decoding its fixed-width records
//! into structured, serializable values.
//!
//! This library provides tools for:
//! - Decoding 15-digit license identifiers into region/district/county/type/expiration/sequence
//! - Decoding 324-byte fixed-width licensee lines into typed records
//! - Splitting zip+4 codes, parsing LOA dates and normalizing telephone numbers
//! - Scanning a whole downloaded file with per-line fault isolation and a summary
//! - Downloading the current licensee file over HTTP
//! - Exporting decoded records as JSON or JSON Lines

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod batch_decoder;
        pub mod downloader;
        pub mod fixed_width;
        pub mod record_export;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Address, IdentifierValue, LicenseIdentifier, LicenseRecord};
pub use app::services::batch_decoder::{BatchDecoder, DecodeStats, LineOutcome};
pub use app::services::fixed_width::{IdentifierRender, decode_identifier, decode_record, split_zip};
pub use config::Config;

/// Result type alias for the eZ Check library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for eZ Check decoding and download operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Structurally invalid license identifier
    #[error("Validation error in {field}: {message}")]
    Validation { field: String, message: String },

    /// Malformed LOA date in an otherwise length-valid record
    #[error("{}", format_date_parsing(field, value, *line))]
    DateParsing {
        field: String,
        value: String,
        line: Option<usize>,
        #[source]
        source: Option<chrono::ParseError>,
    },

    /// HTTP transport error
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server did not answer with a file attachment
    #[error(
        "Invalid response from download service (status {status}, content-disposition: {content_disposition:?})"
    )]
    InvalidResponse {
        status: u16,
        content_disposition: Option<String>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Serialization of decoded records failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// No record in the file matched the requested license
    #[error("No record found for license {license}")]
    RecordNotFound { license: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

fn format_date_parsing(field: &str, value: &str, line: Option<usize>) -> String {
    match line {
        Some(line) => format!(
            "Date parsing error in {} on line {}: '{}' is not MMDDYYYY",
            field, line, value
        ),
        None => format!(
            "Date parsing error in {}: '{}' is not MMDDYYYY",
            field, value
        ),
    }
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a validation error for a named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a date parsing error for a named field
    pub fn date_parsing(
        field: impl Into<String>,
        value: impl Into<String>,
        source: Option<chrono::ParseError>,
    ) -> Self {
        Self::DateParsing {
            field: field.into(),
            value: value.into(),
            line: None,
            source,
        }
    }

    /// Create an HTTP error with context
    pub fn http(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(status: u16, content_disposition: Option<String>) -> Self {
        Self::InvalidResponse {
            status,
            content_disposition,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a record not found error
    pub fn record_not_found(license: impl Into<String>) -> Self {
        Self::RecordNotFound {
            license: license.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Attach a 1-based line number to a date parsing error
    ///
    /// Other variants are returned unchanged.
    pub fn at_line(self, line_number: usize) -> Self {
        match self {
            Self::DateParsing {
                field,
                value,
                source,
                ..
            } => Self::DateParsing {
                field,
                value,
                line: Some(line_number),
                source,
            },
            other => other,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Http {
            message: "HTTP request failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid configuration file: {}", error),
        }
    }
}
