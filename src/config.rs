//! Configuration management and validation.
//!
//! Provides the layered configuration used by the CLI: built-in defaults,
//! an optional TOML file, `EZCHECK_*` environment variables and finally
//! command-line overrides, in increasing order of precedence.

use crate::constants::{
    APP_NAME, CONFIG_FILE_NAME, DEFAULT_CHUNK_LOG_INTERVAL, DEFAULT_DOWNLOAD_URL,
    DEFAULT_FILE_PREFIX, DEFAULT_TIMEOUT_SECS, env_vars,
};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Settings for the licensee file download
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// eZ Check download endpoint
    pub url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,

    /// Log progress every this many received chunks
    pub chunk_log_interval: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DOWNLOAD_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            accept_invalid_certs: false,
            chunk_log_interval: DEFAULT_CHUNK_LOG_INTERVAL,
        }
    }
}

/// Settings for where files are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for downloaded files when no explicit path is given
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

/// Global configuration for eZ Check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub download: DownloadConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Default location of the configuration file
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config file {}", path.display()), e))?;
        let config: Config = toml::from_str(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load defaults, then the config file (if any), then the environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply environment overrides using the given variable lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(env_vars::DOWNLOAD_URL) {
            self.download.url = url;
        }

        if let Some(timeout) = lookup(env_vars::TIMEOUT_SECS) {
            self.download.timeout_secs = timeout.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    env_vars::TIMEOUT_SECS,
                    timeout
                ))
            })?;
        }

        if let Some(flag) = lookup(env_vars::ACCEPT_INVALID_CERTS) {
            self.download.accept_invalid_certs = parse_bool(&flag).ok_or_else(|| {
                Error::configuration(format!(
                    "{} must be true or false, got '{}'",
                    env_vars::ACCEPT_INVALID_CERTS,
                    flag
                ))
            })?;
        }

        if let Some(directory) = lookup(env_vars::OUTPUT_DIR) {
            self.output.directory = PathBuf::from(directory);
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.download_url()?;

        if self.download.timeout_secs == 0 {
            return Err(Error::configuration("Download timeout must be greater than 0 seconds"));
        }

        if self.download.chunk_log_interval == 0 {
            return Err(Error::configuration("Chunk log interval must be greater than 0"));
        }

        Ok(())
    }

    /// Parsed download URL
    pub fn download_url(&self) -> Result<Url> {
        if self.download.url.trim().is_empty() {
            return Err(Error::configuration("Download URL must not be empty"));
        }
        Url::parse(&self.download.url).map_err(|e| {
            Error::configuration(format!("Invalid download URL '{}': {}", self.download.url, e))
        })
    }

    /// Default path for a download made on the given date
    pub fn default_download_path(&self, date: NaiveDate) -> PathBuf {
        self.output.directory.join(format!(
            "{}-{}",
            DEFAULT_FILE_PREFIX,
            date.format("%Y-%m-%d")
        ))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
