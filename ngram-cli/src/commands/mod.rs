//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;

pub mod count;
pub mod histogram;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Count n-gram frequencies in the input
    Count(count::CountArgs),

    /// Print how often every byte value occurs in a file
    Histogram(histogram::HistogramArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Count(args) => args.execute(),
            Commands::Histogram(args) => args.execute(),
        }
    }
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        // Ignore an already installed logger
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_commands_debug_format() {
        let histogram_cmd = Commands::Histogram(histogram::HistogramArgs {
            input: PathBuf::from("data.bin"),
            output: None,
        });

        let debug_str = format!("{:?}", histogram_cmd);
        assert!(debug_str.contains("Histogram"));
        assert!(debug_str.contains("data.bin"));
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging(2, false);
        init_logging(0, false);
        init_logging(0, true);
    }
}
