//! Data models for eZ Check licensee records
//!
//! This module contains the value objects produced by the decoders: the
//! decomposed license identifier, postal addresses, and the complete
//! licensee record. All of them serialize with the field labels used by
//! the ATF file layout so exported documents read like the source.

use crate::constants::identifier::{self, SubField};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// License Identifier
// =============================================================================

/// A single decoded identifier sub-field
///
/// Integer form drops leading zeros; text form keeps the zero-padded digits
/// exactly as they appeared in the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdentifierValue {
    Integer(u32),
    Text(String),
}

impl IdentifierValue {
    /// Render the value zero-padded to `width` digits
    pub fn padded(&self, width: usize) -> String {
        match self {
            IdentifierValue::Integer(value) => format!("{:0width$}", value, width = width),
            IdentifierValue::Text(value) => format!("{:0>width$}", value, width = width),
        }
    }

    /// Integer value, parsing the text form if necessary
    pub fn as_integer(&self) -> Option<u32> {
        match self {
            IdentifierValue::Integer(value) => Some(*value),
            IdentifierValue::Text(value) => value.parse().ok(),
        }
    }
}

impl fmt::Display for IdentifierValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierValue::Integer(value) => write!(f, "{}", value),
            IdentifierValue::Text(value) => f.write_str(value),
        }
    }
}

/// A license identifier decomposed into its six sub-fields
///
/// Layout of the 15 digits: Region(1) District(2) County(3) Type(2)
/// Expiration(2) Sequence(5). Expiration is always kept as its raw
/// two-character code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LicenseIdentifier {
    pub region: IdentifierValue,
    pub district: IdentifierValue,
    pub county: IdentifierValue,
    #[serde(rename = "Type")]
    pub license_type: IdentifierValue,
    pub expiration: String,
    pub sequence: IdentifierValue,
}

impl LicenseIdentifier {
    /// Sub-fields zero-padded to their original widths, in identifier order
    pub fn padded_parts(&self) -> [String; 6] {
        [
            self.region.padded(identifier::REGION.width),
            self.district.padded(identifier::DISTRICT.width),
            self.county.padded(identifier::COUNTY.width),
            self.license_type.padded(identifier::TYPE.width),
            self.expiration.clone(),
            self.sequence.padded(identifier::SEQUENCE.width),
        ]
    }

    /// Reconstruct the undashed 15-digit identifier
    pub fn to_padded_string(&self) -> String {
        self.padded_parts().concat()
    }

    /// Render the identifier in its dashed display form (X-XX-XXX-XX-XX-XXXXX)
    pub fn dashed(&self) -> String {
        self.padded_parts().join("-")
    }

    /// Form parameters selecting this license on the download service
    pub fn form_params(&self) -> Vec<(&'static str, String)> {
        identifier::ALL
            .iter()
            .map(|sub_field: &SubField| sub_field.form_label)
            .zip(self.padded_parts())
            .collect()
    }

    /// Whether two identifiers name the same licensee
    ///
    /// The expiration code changes when a license is renewed, so it is not
    /// compared.
    pub fn same_licensee(&self, other: &LicenseIdentifier) -> bool {
        let ours = self.padded_parts();
        let theirs = other.padded_parts();
        ours.iter()
            .zip(theirs.iter())
            .enumerate()
            .filter(|(index, _)| *index != 4)
            .all(|(_, (a, b))| a == b)
    }
}

impl fmt::Display for LicenseIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dashed())
    }
}

// =============================================================================
// Address
// =============================================================================

/// A business or mailing address from a licensee record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,

    /// Five-digit zip code, `None` when the field was blank or not numeric
    pub zip_code: Option<u32>,

    /// Four-digit extension, `None` when the zip had no extension
    pub zip_code_plus_four: Option<u32>,
}

// =============================================================================
// License Record
// =============================================================================

/// One decoded line of the licensee file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LicenseRecord {
    /// Identifier exactly as it appeared in the file (trimmed, upper-cased)
    pub license_number: String,

    #[serde(flatten)]
    pub identifier: LicenseIdentifier,

    pub license_name: String,
    pub business_name: String,
    pub business_address: Address,
    pub mailing_address: Address,

    /// Telephone digits, 0 when missing or not numeric
    pub telephone: u64,

    #[serde(rename = "LOAIssueDate")]
    pub loa_issue_date: Option<NaiveDate>,

    #[serde(rename = "LOAExpirationDate")]
    pub loa_expiration_date: Option<NaiveDate>,
}

impl LicenseRecord {
    /// Whether the licensee holds a Letter of Authorization
    pub fn has_loa(&self) -> bool {
        self.loa_issue_date.is_some() || self.loa_expiration_date.is_some()
    }

    /// Name to display for the licensee, preferring the business name
    pub fn display_name(&self) -> &str {
        if self.business_name.is_empty() {
            &self.license_name
        } else {
            &self.business_name
        }
    }
}
