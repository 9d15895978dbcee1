//! Parse command implementation
//!
//! Runs a batch decode over a downloaded file, optionally exporting the
//! records, and reports the decode statistics.

use super::shared::{format_decode_summary, setup_logging};
use crate::app::services::batch_decoder::{BatchDecoder, DecodeStats};
use crate::app::services::record_export::{ExportFormat, RecordExporter};
use crate::cli::args::ParseArgs;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Decode a licensee file and report a summary
pub async fn run_parse(args: ParseArgs) -> Result<()> {
    setup_logging(&args.common)?;
    args.validate()?;

    let start = Instant::now();
    let input = args.input_file.clone();
    let output = args.output_file.clone();
    let export_format = args.format.export_format();

    let stats = tokio::task::spawn_blocking(move || {
        decode_to_output(&input, output.as_deref(), export_format)
    })
    .await
    .map_err(|e| Error::processing_interrupted(format!("Decode task failed: {}", e)))??;

    if !stats.is_clean() {
        warn!("{} record lines could not be decoded", stats.lines_failed);
    }

    if !args.common.quiet {
        let report = format_decode_summary(
            &args.input_file,
            &stats,
            start.elapsed(),
            args.common.verbose > 0,
        );
        // Keep stdout clean for records streamed there
        if export_format.is_some() && args.output_file.is_none() {
            eprint!("{}", report);
        } else {
            print!("{}", report);
        }
    }

    Ok(())
}

/// Decode `input`, streaming records to `output` (or stdout) when an export
/// format is given
pub fn decode_to_output(
    input: &Path,
    output: Option<&Path>,
    export_format: Option<ExportFormat>,
) -> Result<DecodeStats> {
    let mut decoder = BatchDecoder::open(input)?;
    info!(
        "Decoding {} ({} bytes)",
        input.display(),
        decoder.stream_length()
    );

    match export_format {
        None => {
            for outcome in &mut decoder {
                outcome?;
            }
        }
        Some(format) => {
            let writer: Box<dyn Write> = match output {
                Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|e| {
                    Error::io(format!("Failed to create {}", path.display()), e)
                })?)),
                None => Box::new(BufWriter::new(std::io::stdout().lock())),
            };

            let mut exporter = RecordExporter::new(writer, format)?;
            for record in decoder.records() {
                exporter.write_record(&record?)?;
            }
            let written = exporter.finish()?;

            if let Some(path) = output {
                info!("Wrote {} records to {}", written, path.display());
            }
        }
    }

    let stats = decoder.into_stats();
    info!("{}", stats.summary_line());
    Ok(stats)
}
