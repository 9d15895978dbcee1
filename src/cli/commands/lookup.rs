//! Lookup command implementation

use super::shared::setup_logging;
use crate::app::models::{LicenseIdentifier, LicenseRecord};
use crate::app::services::batch_decoder::BatchDecoder;
use crate::app::services::fixed_width::{IdentifierRender, decode_identifier};
use crate::cli::args::LookupArgs;
use crate::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Print the record for one license as JSON
pub async fn run_lookup(args: LookupArgs) -> Result<()> {
    setup_logging(&args.common)?;
    args.validate()?;

    let target = decode_identifier(&args.license, IdentifierRender::Text)?;
    let input = args.input_file.clone();

    let record = tokio::task::spawn_blocking(move || find_record(&input, &target))
        .await
        .map_err(|e| Error::processing_interrupted(format!("Lookup task failed: {}", e)))??;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Scan a licensee file for the first record of the given licensee
///
/// The expiration code is ignored so a renewed license still matches.
pub fn find_record(path: &Path, target: &LicenseIdentifier) -> Result<LicenseRecord> {
    let mut decoder = BatchDecoder::open(path)?;

    for record in decoder.records() {
        let record = record?;
        if record.identifier.same_licensee(target) {
            debug!("Found {} in {}", target, path.display());
            return Ok(record);
        }
    }

    Err(Error::record_not_found(target.dashed()))
}
