//! Application constants for eZ Check
//!
//! This module contains the fixed-width record layout of the ATF licensee
//! file, the license identifier sub-layout, and the defaults used by the
//! download and configuration layers.

// =============================================================================
// Record Layout
// =============================================================================

/// Length of one raw record line, including its trailing terminator byte
pub const RECORD_LENGTH: usize = 324;

/// Length of the field area of a record line (everything but the terminator)
pub const RECORD_FIELDS_LENGTH: usize = 323;

/// Number of bytes skipped at the start of a downloaded file
pub const LEADING_SEPARATOR_LENGTH: u64 = 1;

/// Fixed-width fields of a licensee record, in file order
pub mod fields {
    /// A named byte range within a record line
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Field {
        pub name: &'static str,
        pub offset: usize,
        pub width: usize,
    }

    impl Field {
        /// Byte range covered by this field
        pub const fn range(&self) -> std::ops::Range<usize> {
            self.offset..self.offset + self.width
        }
    }

    pub const LICENSE_NUMBER: Field = Field {
        name: "LicenseNumber",
        offset: 0,
        width: 15,
    };
    pub const LICENSE_NAME: Field = Field {
        name: "LicenseName",
        offset: 15,
        width: 50,
    };
    pub const BUSINESS_NAME: Field = Field {
        name: "BusinessName",
        offset: 65,
        width: 50,
    };
    pub const BUSINESS_STREET: Field = Field {
        name: "BusinessStreet",
        offset: 115,
        width: 50,
    };
    pub const BUSINESS_CITY: Field = Field {
        name: "BusinessCity",
        offset: 165,
        width: 30,
    };
    pub const BUSINESS_STATE: Field = Field {
        name: "BusinessState",
        offset: 195,
        width: 2,
    };
    pub const BUSINESS_ZIP_CODE: Field = Field {
        name: "BusinessZipCode",
        offset: 197,
        width: 9,
    };
    pub const MAILING_STREET: Field = Field {
        name: "MailingStreet",
        offset: 206,
        width: 50,
    };
    pub const MAILING_CITY: Field = Field {
        name: "MailingCity",
        offset: 256,
        width: 30,
    };
    pub const MAILING_STATE: Field = Field {
        name: "MailingState",
        offset: 286,
        width: 2,
    };
    pub const MAILING_ZIP_CODE: Field = Field {
        name: "MailingZipCode",
        offset: 288,
        width: 9,
    };
    pub const TELEPHONE: Field = Field {
        name: "Telephone",
        offset: 297,
        width: 10,
    };
    pub const LOA_ISSUE_DATE: Field = Field {
        name: "LOAIssueDate",
        offset: 307,
        width: 8,
    };
    pub const LOA_EXPIRATION_DATE: Field = Field {
        name: "LOAExpirationDate",
        offset: 315,
        width: 8,
    };

    /// All record fields in file order
    pub const ALL: [Field; 14] = [
        LICENSE_NUMBER,
        LICENSE_NAME,
        BUSINESS_NAME,
        BUSINESS_STREET,
        BUSINESS_CITY,
        BUSINESS_STATE,
        BUSINESS_ZIP_CODE,
        MAILING_STREET,
        MAILING_CITY,
        MAILING_STATE,
        MAILING_ZIP_CODE,
        TELEPHONE,
        LOA_ISSUE_DATE,
        LOA_EXPIRATION_DATE,
    ];
}

/// Format of the LOA date fields (MMDDYYYY)
pub const LOA_DATE_FORMAT: &str = "%m%d%Y";

// =============================================================================
// License Identifier Layout
// =============================================================================

/// Length of a license identifier once dashes are removed
pub const IDENTIFIER_LENGTH: usize = 15;

/// Sub-fields of a license identifier
pub mod identifier {
    /// A named character range within a license identifier
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SubField {
        pub name: &'static str,
        pub offset: usize,
        pub width: usize,
        /// Form label used when requesting a download for this identifier
        pub form_label: &'static str,
    }

    impl SubField {
        pub const fn range(&self) -> std::ops::Range<usize> {
            self.offset..self.offset + self.width
        }
    }

    pub const REGION: SubField = SubField {
        name: "Region",
        offset: 0,
        width: 1,
        form_label: "licRegn",
    };
    pub const DISTRICT: SubField = SubField {
        name: "District",
        offset: 1,
        width: 2,
        form_label: "licDist",
    };
    pub const COUNTY: SubField = SubField {
        name: "County",
        offset: 3,
        width: 3,
        form_label: "licCnty",
    };
    pub const TYPE: SubField = SubField {
        name: "Type",
        offset: 6,
        width: 2,
        form_label: "licType",
    };
    pub const EXPIRATION: SubField = SubField {
        name: "Expiration",
        offset: 8,
        width: 2,
        form_label: "licXprdte",
    };
    pub const SEQUENCE: SubField = SubField {
        name: "Sequence",
        offset: 10,
        width: 5,
        form_label: "licSeqn",
    };

    /// All identifier sub-fields in order
    pub const ALL: [SubField; 6] = [REGION, DISTRICT, COUNTY, TYPE, EXPIRATION, SEQUENCE];
}

// =============================================================================
// Download Defaults
// =============================================================================

/// eZ Check bulk download endpoint
pub const DEFAULT_DOWNLOAD_URL: &str = "https://fflezcheck.atf.gov/fflezcheck/fflDownload.do";

/// Form field and value that select the bulk download action
pub const DOWNLOAD_SEARCH_FIELD: (&str, &str) = ("Search", "Download");

/// Default HTTP timeout for the download request
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Log download progress every this many chunks
pub const DEFAULT_CHUNK_LOG_INTERVAL: usize = 1000;

/// Prefix for default download file names (suffixed with the date)
pub const DEFAULT_FILE_PREFIX: &str = "ffldb";

/// Application name used for config and data directories
pub const APP_NAME: &str = "ezcheck";

/// Configuration file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Environment Variables
// =============================================================================

pub mod env_vars {
    pub const DOWNLOAD_URL: &str = "EZCHECK_DOWNLOAD_URL";
    pub const TIMEOUT_SECS: &str = "EZCHECK_TIMEOUT_SECS";
    pub const ACCEPT_INVALID_CERTS: &str = "EZCHECK_ACCEPT_INVALID_CERTS";
    pub const OUTPUT_DIR: &str = "EZCHECK_OUTPUT_DIR";
}
