//! Histogram command implementation

use crate::error::CliError;
use crate::input::FileReader;
use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use ngram_core::{ByteHistogram, ReaderSource};
use std::path::PathBuf;

/// Arguments for the histogram command
#[derive(Debug, Args)]
pub struct HistogramArgs {
    /// File to scan
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl HistogramArgs {
    /// Execute the histogram command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(0, false);

        let file = FileReader::open(&self.input)?;
        let histogram = ByteHistogram::from_source(ReaderSource::new(file))
            .map_err(CliError::from)
            .with_context(|| format!("Failed to read {}", self.input.display()))?;
        log::debug!("{} bytes scanned", histogram.total());

        let mut sink = output::open_output(self.output.as_deref())?;
        histogram.render(&mut sink).map_err(CliError::from)?;
        Ok(())
    }
}
