//! Byte value histogram

use crate::error::Result;
use crate::io::{ByteSink, ByteSource};
use std::fmt;

/// Entries per rendered row
pub const COLUMNS: usize = 8;

/// Occurrence count of every byte value in a stream
#[derive(Clone, PartialEq, Eq)]
pub struct ByteHistogram {
    counts: [u64; 256],
}

impl ByteHistogram {
    /// All counters at zero
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Count every byte of `source` until end of stream
    pub fn from_source<S: ByteSource>(mut source: S) -> Result<Self> {
        let mut histogram = Self::new();
        while let Some(byte) = source.next_byte()? {
            histogram.add(byte);
        }
        Ok(histogram)
    }

    /// Record one occurrence of `byte`
    pub fn add(&mut self, byte: u8) {
        self.counts[usize::from(byte)] += 1;
    }

    /// Occurrences of `byte`
    pub fn count(&self, byte: u8) -> u64 {
        self.counts[usize::from(byte)]
    }

    /// Bytes counted
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Write the table, eight `hh: count` entries per line
    pub fn render<K: ByteSink + ?Sized>(&self, sink: &mut K) -> Result<()> {
        for (index, counts) in self.counts.chunks(COLUMNS).enumerate() {
            let mut line = String::with_capacity(COLUMNS * 10);
            for (offset, count) in counts.iter().enumerate() {
                let byte = index * COLUMNS + offset;
                line.push_str(&format!("{byte:02x}: {count:<4} "));
            }
            line.push('\n');
            sink.put_bytes(line.as_bytes())?;
        }
        sink.flush()
    }
}

impl Default for ByteHistogram {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ByteHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let distinct = self.counts.iter().filter(|&&c| c > 0).count();
        f.debug_struct("ByteHistogram")
            .field("total", &self.total())
            .field("distinct", &distinct)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::SliceSource;

    #[test]
    fn test_counts() {
        let histogram = ByteHistogram::from_source(SliceSource::new(b"abracadabra\0")).unwrap();
        assert_eq!(histogram.count(b'a'), 5);
        assert_eq!(histogram.count(b'b'), 2);
        assert_eq!(histogram.count(0), 1);
        assert_eq!(histogram.count(b'z'), 0);
        assert_eq!(histogram.total(), 12);
    }

    #[test]
    fn test_render_layout() {
        let mut histogram = ByteHistogram::new();
        histogram.add(0x00);
        histogram.add(0x41);
        histogram.add(0x41);

        let mut out = Vec::new();
        histogram.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 256 / COLUMNS);
        assert!(lines[0].starts_with("00: 1    01: 0    "));
        assert!(lines[8].starts_with("40: 0    41: 2    "));
        assert!(lines[31].starts_with("f8: 0"));
    }

    #[test]
    fn test_empty_source() {
        let histogram = ByteHistogram::from_source(SliceSource::new(b"")).unwrap();
        assert_eq!(histogram.total(), 0);
    }
}
