//! Fixed-width decoder for ATF licensee records
//!
//! This module turns one 324-byte line of the eZ Check download into a typed
//! [`LicenseRecord`](crate::app::models::LicenseRecord). The layout is fixed
//! by the ATF file format and lives in [`crate::constants`].
//!
//! ## Architecture
//!
//! - [`identifier`] - License identifier decomposition (region, district, ...)
//! - [`zip_code`] - Zip+4 splitting
//! - [`field_parsers`] - Byte slicing, text normalization, dates and telephones
//! - [`record_decoder`] - Whole-line decoding built from the pieces above
//!
//! ## Usage
//!
//! ```rust
//! use ezcheck::app::services::fixed_width::{IdentifierRender, decode_identifier, split_zip};
//!
//! let id = decode_identifier("9-08-037-01-51-00042", IdentifierRender::Integer).unwrap();
//! assert_eq!(id.to_padded_string(), "908037015100042");
//! assert_eq!(split_zip("123456789"), (Some(12345), Some(6789)));
//! ```

pub mod field_parsers;
pub mod identifier;
pub mod record_decoder;
pub mod zip_code;

#[cfg(test)]
pub mod tests;

// Re-export main entry points for easy access
pub use identifier::{IdentifierRender, decode_identifier, normalize_identifier};
pub use record_decoder::decode_record;
pub use zip_code::split_zip;
