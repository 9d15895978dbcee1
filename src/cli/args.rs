//! Command-line argument definitions for eZ Check
//!
//! This module defines the CLI interface using the clap derive API.

use crate::app::services::fixed_width::{IdentifierRender, decode_identifier};
use crate::app::services::record_export::ExportFormat;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the eZ Check licensee tool
///
/// Downloads the ATF Federal Firearms Licensee listing and decodes its
/// fixed-width records into structured data.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ezcheck",
    version,
    about = "Download and decode the ATF FFL eZ Check licensee file",
    long_about = "Downloads the current Federal Firearms Licensee listing from the ATF eZ Check \
                  service and decodes its fixed-width records into JSON. Any valid license \
                  number can be used to authorize the download."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Download the current licensee file
    Download(DownloadArgs),
    /// Decode a downloaded licensee file and report a summary
    Parse(ParseArgs),
    /// Find the record for one license in a downloaded file
    Lookup(LookupArgs),
}

/// Flags shared by every command
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct CommonArgs {
    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/ezcheck/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,
}

impl CommonArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Validate shared arguments
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }
}

/// Arguments for the download command
#[derive(Debug, Clone, Parser)]
pub struct DownloadArgs {
    /// License number authorizing the download (dashes optional)
    #[arg(value_name = "LICENSE")]
    pub license: String,

    /// File to write the download to
    ///
    /// Defaults to <output dir>/ffldb-YYYY-MM-DD
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Skip TLS certificate verification
    #[arg(long = "insecure", help = "Skip TLS certificate verification")]
    pub insecure: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Downloaded licensee file
    #[arg(value_name = "FILE")]
    pub input_file: PathBuf,

    /// Write decoded records to this file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Layout of the decoded records
    #[arg(long = "format", value_enum, default_value = "summary")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the lookup command
#[derive(Debug, Clone, Parser)]
pub struct LookupArgs {
    /// Downloaded licensee file
    #[arg(value_name = "FILE")]
    pub input_file: PathBuf,

    /// License number to look up (dashes optional)
    #[arg(value_name = "LICENSE")]
    pub license: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output layouts for decoded records
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the decode summary
    Summary,
    /// A JSON array of records
    Json,
    /// One JSON record per line
    Jsonl,
}

impl OutputFormat {
    /// Record export format, if this layout writes records
    pub fn export_format(&self) -> Option<ExportFormat> {
        match self {
            OutputFormat::Summary => None,
            OutputFormat::Json => Some(ExportFormat::Json),
            OutputFormat::Jsonl => Some(ExportFormat::JsonLines),
        }
    }
}

/// Validate a license argument before any work is done
///
/// Uses the same decoding the commands apply later, so anything accepted
/// here also decodes there.
fn validate_license(license: &str) -> Result<()> {
    decode_identifier(license, IdentifierRender::Text).map(|_| ())
}

impl DownloadArgs {
    /// Validate the download command arguments
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;
        validate_license(&self.license)?;

        if let Some(output_file) = &self.output_file {
            if let Some(parent) = output_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }
        Ok(())
    }
}

impl ParseArgs {
    /// Validate the parse command arguments
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;

        if !self.input_file.is_file() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input_file.display()
            )));
        }

        if self.output_file.is_some() && self.format == OutputFormat::Summary {
            return Err(Error::configuration("--output requires --format json or --format jsonl"));
        }
        Ok(())
    }
}

impl LookupArgs {
    /// Validate the lookup command arguments
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;
        validate_license(&self.license)?;

        if !self.input_file.is_file() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input_file.display()
            )));
        }
        Ok(())
    }
}
