//! ngram command-line entry point

use clap::Parser;
use ngram_cli::commands::Commands;
use std::process::ExitCode;

/// Generate n-grams from arbitrary data
///
/// Input is read as raw bytes, so the tool works on textual or binary data.
/// Output is in the form of escaped strings.
#[derive(Debug, Parser)]
#[command(name = "ngram", version, about, long_about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
