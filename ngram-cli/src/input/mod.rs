//! Input handling module

pub mod file_reader;
pub mod glob_resolver;

pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;

use anyhow::Result;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

/// Byte stream to count, with its size when known
pub struct InputStream {
    /// Concatenated contents of every input
    pub reader: Box<dyn Read>,
    /// Total size in bytes; `None` for stdin
    pub total_bytes: Option<u64>,
}

/// Open the files matching `patterns` as one stream, or stdin when empty
///
/// Files are read in sorted path order.
pub fn open_inputs(patterns: &[String]) -> Result<InputStream> {
    if patterns.is_empty() {
        log::debug!("Reading from stdin");
        return Ok(InputStream {
            reader: Box::new(io::stdin()),
            total_bytes: None,
        });
    }

    let files = resolve_patterns(patterns)?;
    let mut total_bytes = 0;
    for path in &files {
        log::debug!("Queueing input: {}", path.display());
        total_bytes += FileReader::file_size(path)?;
    }
    log::info!("Reading {} file(s), {} bytes", files.len(), total_bytes);

    Ok(InputStream {
        reader: Box::new(ConcatReader::new(files)),
        total_bytes: Some(total_bytes),
    })
}

/// Reads files one after another, opening each when the previous one ends
pub struct ConcatReader {
    pending: VecDeque<PathBuf>,
    current: Option<File>,
}

impl ConcatReader {
    /// Read `paths` in order
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            pending: paths.into_iter().collect(),
            current: None,
        }
    }
}

impl Read for ConcatReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            if let Some(file) = self.current.as_mut() {
                let n = file.read(buf)?;
                if n > 0 {
                    return Ok(n);
                }
                self.current = None;
            }
            let Some(path) = self.pending.pop_front() else {
                return Ok(0);
            };
            let file = File::open(&path).map_err(|e| {
                io::Error::new(e.kind(), format!("{}: {e}", path.display()))
            })?;
            self.current = Some(file);
        }
    }
}
