//! Progress reporting for licensee file downloads

use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use tracing::debug;

/// Byte progress bar for a download, or nothing when disabled
pub struct DownloadProgress {
    progress_bar: Option<ProgressBar>,
}

impl DownloadProgress {
    /// Create a progress reporter
    ///
    /// With a known content length this is a bar, otherwise a spinner that
    /// counts bytes.
    pub fn new(enabled: bool, content_length: Option<u64>) -> Self {
        if !enabled {
            return Self { progress_bar: None };
        }

        let pb = match content_length {
            Some(total) => {
                let pb = ProgressBar::new(total);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) | {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("█▉▊▋▌▍▎▏  "),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.green} [{elapsed_precise}] {bytes} ({bytes_per_sec}) | {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                pb
            }
        };
        pb.set_message("Downloading licensee file");

        debug!("Download progress initialized (content length {:?})", content_length);
        Self {
            progress_bar: Some(pb),
        }
    }

    /// Record received bytes
    pub fn advance(&self, bytes: usize) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(bytes as u64);
        }
    }

    /// Finish with a completion message
    pub fn finish(&self, bytes_written: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(format!("Downloaded {}", HumanBytes(bytes_written)));
        }
    }

    /// Finish with an error message
    pub fn abandon(&self, error_message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.abandon_with_message(format!("Failed: {}", error_message));
        }
    }

    /// Check if progress reporting is enabled
    pub fn is_enabled(&self) -> bool {
        self.progress_bar.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_progress_is_inert() {
        let progress = DownloadProgress::new(false, Some(100));
        assert!(!progress.is_enabled());
        progress.advance(50);
        progress.finish(50);
    }

    #[test]
    fn test_enabled_progress_with_and_without_length() {
        let progress = DownloadProgress::new(true, Some(1024));
        assert!(progress.is_enabled());
        progress.advance(512);
        progress.finish(512);

        let spinner = DownloadProgress::new(true, None);
        spinner.advance(10);
        spinner.abandon("connection reset");
    }
}
