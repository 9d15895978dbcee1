//! Licensee file download from the eZ Check service
//!
//! The service hands out the complete licensee listing to anyone who can
//! name a valid license: the request is a form POST carrying the six
//! identifier sub-fields, and a successful answer is a file attachment.
//!
//! - [`client`] - HTTP request, attachment check and streaming write
//! - [`progress`] - Optional byte progress bar

pub mod client;
pub mod progress;

pub use client::{DownloadSummary, FflDownloader, attachment_filename, is_attachment};
pub use progress::DownloadProgress;
