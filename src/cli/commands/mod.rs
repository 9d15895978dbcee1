//! Command implementations for the eZ Check CLI
//!
//! Each command is implemented in its own module:
//! - `download`: fetch the current licensee file
//! - `parse`: batch decode a file with optional JSON export
//! - `lookup`: find one licensee's record

pub mod download;
pub mod lookup;
pub mod parse;
pub mod shared;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Main command runner
pub async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Download(download_args)) => download::run_download(download_args).await,
        Some(Commands::Parse(parse_args)) => parse::run_parse(parse_args).await,
        Some(Commands::Lookup(lookup_args)) => lookup::run_lookup(lookup_args).await,
        None => Err(Error::configuration(
            "No command given (expected download, parse or lookup)",
        )),
    }
}
