//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::time::Duration;

/// Progress reporter for input consumption
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Track bytes read through `reader`
    ///
    /// Shows a bar when the total is known and a spinner otherwise. Nothing
    /// is drawn when quiet or when stderr is not a terminal.
    pub fn wrap_reader(&mut self, reader: Box<dyn Read>, total_bytes: Option<u64>) -> Box<dyn Read> {
        if self.quiet {
            return reader;
        }

        let pb = match total_bytes {
            Some(total) => ProgressBar::new(total).with_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("##-"),
            ),
            None => ProgressBar::new_spinner().with_style(
                ProgressStyle::default_spinner()
                    .template("{spinner} [{elapsed_precise}] {bytes} read {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            ),
        };
        pb.enable_steady_tick(Duration::from_millis(100));

        let wrapped = Box::new(pb.wrap_read(reader));
        self.progress_bar = Some(pb);
        wrapped
    }

    /// Finish progress reporting
    pub fn finish(&self, ngrams: usize) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("{} n-grams", ngrams));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_quiet_passes_reader_through() {
        let mut reporter = ProgressReporter::new(true);
        let mut reader = reporter.wrap_reader(Box::new(Cursor::new(b"abc".to_vec())), Some(3));
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, b"abc");
        assert!(reporter.progress_bar.is_none());
        reporter.finish(0);
    }

    #[test]
    fn test_wrapped_reader_yields_all_bytes() {
        let mut reporter = ProgressReporter::new(false);
        let mut reader = reporter.wrap_reader(Box::new(Cursor::new(vec![7u8; 100])), None);
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).unwrap();
        assert_eq!(buf.len(), 100);
        assert!(reporter.progress_bar.is_some());
        reporter.finish(1);
    }
}
