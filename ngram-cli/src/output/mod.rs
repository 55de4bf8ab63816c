//! Output destination module

use anyhow::{Context, Result};
use ngram_core::WriterSink;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Buffered byte sink over a file or stdout
pub type OutputSink = WriterSink<Box<dyn Write>>;

/// Open `path` for writing, or stdout when `None`
pub fn open_output(path: Option<&Path>) -> Result<OutputSink> {
    let writer: Box<dyn Write> = match path {
        Some(path) => {
            log::debug!("Writing to {}", path.display());
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(io::stdout().lock()),
    };

    Ok(WriterSink::new(writer))
}
