//! License identifier decoding
//!
//! A license identifier is 15 characters, optionally written with dash
//! separators (`X-XX-XXX-XX-XX-XXXXX`). It splits at fixed offsets into
//! Region, District, County, Type, Expiration and Sequence.

use crate::app::models::{IdentifierValue, LicenseIdentifier};
use crate::constants::{IDENTIFIER_LENGTH, identifier};
use crate::{Error, Result};
use tracing::debug;

/// How numeric sub-fields are rendered by [`decode_identifier`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierRender {
    /// Convert to integers (leading zeros are dropped)
    #[default]
    Integer,
    /// Keep the zero-padded digit strings
    Text,
}

/// Remove dash separators from an identifier
pub fn normalize_identifier(identifier: &str) -> String {
    identifier.chars().filter(|&c| c != '-').collect()
}

/// Decode a license identifier into its six sub-fields
///
/// Fails with [`Error::Validation`] when the dash-stripped identifier is not
/// 15 characters long, or when a numeric sub-field contains anything but
/// ASCII digits. The expiration code is kept as its raw two characters.
pub fn decode_identifier(identifier: &str, render: IdentifierRender) -> Result<LicenseIdentifier> {
    let normalized = normalize_identifier(identifier);
    let chars: Vec<char> = normalized.chars().collect();

    if chars.len() != IDENTIFIER_LENGTH {
        debug!("Rejecting identifier '{}' ({} chars)", identifier, chars.len());
        return Err(Error::validation(
            "LicenseNumber",
            format!(
                "invalid identifier length: expected {}, got {} for '{}'",
                IDENTIFIER_LENGTH,
                chars.len(),
                identifier
            ),
        ));
    }

    let slice = |sub_field: identifier::SubField| -> String {
        chars[sub_field.range()].iter().collect()
    };

    let expiration = slice(identifier::EXPIRATION);
    if !expiration.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::validation(
            identifier::EXPIRATION.name,
            format!("invalid expiration code '{}'", expiration),
        ));
    }

    Ok(LicenseIdentifier {
        region: render_numeric(identifier::REGION, slice(identifier::REGION), render)?,
        district: render_numeric(identifier::DISTRICT, slice(identifier::DISTRICT), render)?,
        county: render_numeric(identifier::COUNTY, slice(identifier::COUNTY), render)?,
        license_type: render_numeric(identifier::TYPE, slice(identifier::TYPE), render)?,
        expiration: expiration.to_ascii_uppercase(),
        sequence: render_numeric(identifier::SEQUENCE, slice(identifier::SEQUENCE), render)?,
    })
}

/// Validate a numeric sub-field and render it in the requested form
fn render_numeric(
    sub_field: identifier::SubField,
    digits: String,
    render: IdentifierRender,
) -> Result<IdentifierValue> {
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::validation(
            sub_field.name,
            format!("'{}' is not a {}-digit number", digits, sub_field.width),
        ));
    }

    match render {
        IdentifierRender::Text => Ok(IdentifierValue::Text(digits)),
        IdentifierRender::Integer => digits
            .parse::<u32>()
            .map(IdentifierValue::Integer)
            .map_err(|e| Error::validation(sub_field.name, format!("'{}': {}", digits, e))),
    }
}
