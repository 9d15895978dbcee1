//! Download command implementation

use super::shared::{load_configuration, setup_logging};
use crate::app::services::downloader::FflDownloader;
use crate::cli::args::DownloadArgs;
use crate::{Error, Result};
use colored::Colorize;
use indicatif::HumanBytes;
use tracing::info;

/// Download the current licensee file
pub async fn run_download(args: DownloadArgs) -> Result<()> {
    setup_logging(&args.common)?;
    args.validate()?;

    let mut config = load_configuration(&args.common)?;
    if args.insecure {
        config.download.accept_invalid_certs = true;
    }
    config.validate()?;

    let destination = match &args.output_file {
        Some(path) => path.clone(),
        None => {
            tokio::fs::create_dir_all(&config.output.directory)
                .await
                .map_err(|e| {
                    Error::io(
                        format!(
                            "Failed to create output directory {}",
                            config.output.directory.display()
                        ),
                        e,
                    )
                })?;
            config.default_download_path(chrono::Local::now().date_naive())
        }
    };

    let downloader =
        FflDownloader::new(&config.download)?.with_progress(args.common.show_progress());
    info!("Downloading to {}", destination.display());

    let summary = downloader.download(&args.license, &destination).await?;

    if !args.common.quiet {
        println!(
            "{} {} ({})",
            "Downloaded".green().bold(),
            summary.path.display(),
            HumanBytes(summary.bytes_written)
        );
        if let Some(filename) = &summary.filename {
            println!("  Server file name: {}", filename);
        }
    }

    Ok(())
}
