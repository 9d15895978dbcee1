use clap::Parser;
use ezcheck::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                match signal {
                    Ok(()) => {
                        eprintln!("\nReceived CTRL+C, shutting down...");
                        Err(ezcheck::Error::processing_interrupted("Interrupted by user"))
                    }
                    Err(e) => Err(ezcheck::Error::io("Failed to listen for CTRL+C", e)),
                }
            }
        }
    });

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("eZ Check - ATF Federal Firearms Licensee listing tool");
    println!("=====================================================");
    println!();
    println!("Download the current FFL licensee file from the ATF eZ Check service and");
    println!("decode its fixed-width records into JSON.");
    println!();
    println!("USAGE:");
    println!("    ezcheck <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    download    Download the current licensee file");
    println!("    parse       Decode a downloaded file and report a summary");
    println!("    lookup      Find the record for one license in a downloaded file");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Download using any valid license number:");
    println!("    ezcheck download 9-08-037-01-5H-00042");
    println!();
    println!("    # Decode to JSON Lines, listing failed lines:");
    println!("    ezcheck parse ffldb-2024-01-01 --format jsonl -o records.jsonl -v");
    println!();
    println!("    # Look up a single licensee:");
    println!("    ezcheck lookup ffldb-2024-01-01 9-08-037-01-5H-00042");
    println!();
    println!("For detailed help on any command, use:");
    println!("    ezcheck <COMMAND> --help");
}
