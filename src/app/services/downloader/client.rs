//! HTTP client for the eZ Check bulk download
//!
//! Sends the form POST, checks that the server answered with an attachment,
//! and streams the body into the destination file.

use super::progress::DownloadProgress;
use crate::app::services::fixed_width::{IdentifierRender, decode_identifier};
use crate::config::DownloadConfig;
use crate::constants::DOWNLOAD_SEARCH_FIELD;
use crate::{Error, Result};
use reqwest::header::CONTENT_DISPOSITION;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use url::Url;

/// Maximum number of body characters logged for a rejected response
const REJECTED_BODY_EXCERPT: usize = 512;

/// Outcome of a completed download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Where the file was written
    pub path: PathBuf,

    /// Number of bytes written
    pub bytes_written: u64,

    /// File name suggested by the server, if any
    pub filename: Option<String>,
}

/// Client for the eZ Check licensee file download
#[derive(Debug, Clone)]
pub struct FflDownloader {
    client: reqwest::Client,
    url: Url,
    chunk_log_interval: usize,
    show_progress: bool,
}

impl FflDownloader {
    /// Create a downloader from configuration
    pub fn new(config: &DownloadConfig) -> Result<Self> {
        let url = Url::parse(&config.url).map_err(|e| {
            Error::configuration(format!("Invalid download URL '{}': {}", config.url, e))
        })?;

        if config.accept_invalid_certs {
            warn!("TLS certificate verification is disabled for {}", url);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent(concat!("ezcheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::http("Failed to build HTTP client", e))?;

        Ok(Self {
            client,
            url,
            chunk_log_interval: config.chunk_log_interval.max(1),
            show_progress: false,
        })
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Download endpoint in use
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Form parameters for a download request on behalf of `license`
    ///
    /// The license may be given with or without dashes. Sub-fields are sent
    /// zero-padded.
    pub fn request_params(license: &str) -> Result<Vec<(&'static str, String)>> {
        let identifier = decode_identifier(license, IdentifierRender::Text)?;

        let mut params = vec![(DOWNLOAD_SEARCH_FIELD.0, DOWNLOAD_SEARCH_FIELD.1.to_string())];
        params.extend(identifier.form_params());
        Ok(params)
    }

    /// Download the licensee file into `destination`
    ///
    /// Fails with [`Error::InvalidResponse`] when the server does not return
    /// an attachment; in that case no file is created. A download that
    /// breaks off midway removes its partial file.
    pub async fn download(&self, license: &str, destination: &Path) -> Result<DownloadSummary> {
        let params = Self::request_params(license)?;
        info!(
            "Starting download from {} using license {}",
            self.url, license
        );

        let response = self
            .client
            .post(self.url.clone())
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                Error::http(
                    format!("Failed to send download request to {}", self.url),
                    e,
                )
            })?;

        let status = response.status();
        let disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        if !is_attachment(disposition.as_deref()) {
            let excerpt = body_excerpt(response.text().await);
            debug!("Rejected response (status {}): {}", status, excerpt);
            return Err(Error::invalid_response(status.as_u16(), disposition));
        }

        let filename = disposition.as_deref().and_then(attachment_filename);
        let progress = DownloadProgress::new(self.show_progress, response.content_length());

        match self.write_body(response, destination, &progress).await {
            Ok(bytes_written) => {
                progress.finish(bytes_written);
                info!("Wrote {} bytes to {}", bytes_written, destination.display());
                Ok(DownloadSummary {
                    path: destination.to_path_buf(),
                    bytes_written,
                    filename,
                })
            }
            Err(e) => {
                progress.abandon(&e.to_string());
                if let Err(remove_error) = tokio::fs::remove_file(destination).await {
                    debug!(
                        "Could not remove partial download {}: {}",
                        destination.display(),
                        remove_error
                    );
                }
                Err(e)
            }
        }
    }

    async fn write_body(
        &self,
        mut response: reqwest::Response,
        destination: &Path,
        progress: &DownloadProgress,
    ) -> Result<u64> {
        let mut file = tokio::fs::File::create(destination).await.map_err(|e| {
            Error::io(format!("Failed to create {}", destination.display()), e)
        })?;

        let mut bytes_written = 0u64;
        let mut chunks = 0usize;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| Error::http("Download interrupted", e))?
        {
            file.write_all(&chunk).await.map_err(|e| {
                Error::io(format!("Failed to write to {}", destination.display()), e)
            })?;

            bytes_written += chunk.len() as u64;
            chunks += 1;
            progress.advance(chunk.len());

            if chunks % self.chunk_log_interval == 0 {
                debug!("{} chunks ({} bytes) downloaded", chunks, bytes_written);
            }
        }

        file.flush()
            .await
            .map_err(|e| Error::io(format!("Failed to flush {}", destination.display()), e))?;

        Ok(bytes_written)
    }
}

/// Leading part of a rejected response body, empty when it could not be read
fn body_excerpt<E: std::fmt::Display>(body: std::result::Result<String, E>) -> String {
    match body {
        Ok(body) => body.chars().take(REJECTED_BODY_EXCERPT).collect(),
        Err(e) => {
            debug!("Could not read rejected response body: {}", e);
            String::new()
        }
    }
}

/// Whether a Content-Disposition header marks the response as an attachment
pub fn is_attachment(content_disposition: Option<&str>) -> bool {
    content_disposition
        .map(|value| value.to_ascii_lowercase().contains("attachment"))
        .unwrap_or(false)
}

/// Extract the `filename` parameter from a Content-Disposition header
pub fn attachment_filename(content_disposition: &str) -> Option<String> {
    content_disposition
        .split(';')
        .map(str::trim)
        .find_map(|part| {
            let (key, value) = part.split_once('=')?;
            if key.trim().eq_ignore_ascii_case("filename") {
                Some(value.trim().trim_matches('"').to_string())
            } else {
                None
            }
        })
        .filter(|name| !name.is_empty())
}
