//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading and summary formatting used
//! by more than one command.

use crate::app::services::batch_decoder::DecodeStats;
use crate::cli::args::CommonArgs;
use crate::config::Config;
use crate::{Error, Result};
use colored::Colorize;
use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags when set.
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ezcheck={}", log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (file -> env)
///
/// Command-specific overrides are applied by the caller before validation.
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_ref()
            .filter(|path| path.exists())
            .map(|path| path.as_path()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults and environment variables");
    }

    Config::load_layered(config_file)
}

/// Human-readable report of a decode pass
///
/// Failed lines are listed individually when `list_failures` is set.
pub fn format_decode_summary(
    input: &Path,
    stats: &DecodeStats,
    elapsed: Duration,
    list_failures: bool,
) -> String {
    let mut report = String::new();

    let _ = writeln!(report, "{}", "Decode Summary".bold());
    let _ = writeln!(report, "  File:            {}", input.display());
    let _ = writeln!(report, "  Lines read:      {}", stats.total_lines);
    let _ = writeln!(
        report,
        "  Records decoded: {}",
        stats.records_decoded.to_string().green()
    );
    let _ = writeln!(report, "  Lines skipped:   {}", stats.lines_skipped);

    let failed = if stats.lines_failed == 0 {
        stats.lines_failed.to_string().normal()
    } else {
        stats.lines_failed.to_string().red()
    };
    let _ = writeln!(report, "  Lines failed:    {}", failed);
    let _ = writeln!(report, "  Success rate:    {:.1}%", stats.success_rate());
    let _ = writeln!(report, "  Elapsed:         {:.2?}", elapsed);

    if list_failures && !stats.failures.is_empty() {
        let _ = writeln!(report);
        let _ = writeln!(report, "{}", "Failed lines".yellow().bold());
        for failure in &stats.failures {
            let _ = writeln!(report, "  line {}: {}", failure.line_number, failure.reason);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::batch_decoder::LineFailure;

    fn stats_with_failure() -> DecodeStats {
        DecodeStats {
            total_lines: 4,
            records_decoded: 2,
            lines_skipped: 1,
            lines_failed: 1,
            skipped_lines: vec![4],
            failures: vec![LineFailure {
                line_number: 3,
                reason: "bad date".to_string(),
            }],
        }
    }

    #[test]
    fn test_summary_contains_counts() {
        colored::control::set_override(false);
        let report = format_decode_summary(
            Path::new("ffldb-2024-01-01"),
            &stats_with_failure(),
            Duration::from_millis(250),
            false,
        );

        assert!(report.contains("ffldb-2024-01-01"));
        assert!(report.contains("Records decoded: 2"));
        assert!(report.contains("Lines failed:    1"));
        assert!(report.contains("66.7%"));
        assert!(!report.contains("line 3: bad date"));
    }

    #[test]
    fn test_summary_lists_failures_when_requested() {
        colored::control::set_override(false);
        let report = format_decode_summary(
            Path::new("ffl.txt"),
            &stats_with_failure(),
            Duration::from_secs(1),
            true,
        );
        assert!(report.contains("line 3: bad date"));
    }

    #[test]
    fn test_explicit_missing_config_file_errors() {
        let args = CommonArgs {
            config_file: Some("/definitely/not/here/config.toml".into()),
            ..CommonArgs::default()
        };
        assert!(load_configuration(&args).is_err());
    }
}
