//! Byte source and sink abstractions
//!
//! The engine pulls input one byte at a time and pushes output one byte (or
//! one run of bytes) at a time. Adapters cover `std::io` readers and writers,
//! in-memory slices and vectors, ASCII case folding and byte counting.

use crate::error::Result;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};

/// Pull interface over an input stream
pub trait ByteSource {
    /// Next byte, `Ok(None)` at end of stream
    fn next_byte(&mut self) -> Result<Option<u8>>;
}

/// Push interface over an output stream
pub trait ByteSink {
    /// Write a single byte
    fn put_byte(&mut self, byte: u8) -> Result<()>;

    /// Write a run of bytes
    fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.put_byte(byte)?;
        }
        Ok(())
    }

    /// Flush buffered output, if any
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        (**self).next_byte()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        (**self).next_byte()
    }
}

impl<K: ByteSink + ?Sized> ByteSink for &mut K {
    fn put_byte(&mut self, byte: u8) -> Result<()> {
        (**self).put_byte(byte)
    }

    fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).put_bytes(bytes)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

impl<K: ByteSink + ?Sized> ByteSink for Box<K> {
    fn put_byte(&mut self, byte: u8) -> Result<()> {
        (**self).put_byte(byte)
    }

    fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).put_bytes(bytes)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

impl ByteSink for Vec<u8> {
    fn put_byte(&mut self, byte: u8) -> Result<()> {
        self.try_reserve(1)?;
        self.push(byte);
        Ok(())
    }

    fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.try_reserve(bytes.len())?;
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Source over an in-memory byte slice
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Create a source yielding `bytes` in order
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl ByteSource for SliceSource<'_> {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.bytes.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }
}

/// Buffered source over any [`Read`] implementation
#[derive(Debug)]
pub struct ReaderSource<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> ReaderSource<R> {
    /// Wrap a reader
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => {
                    let byte = buf[0];
                    self.reader.consume(1);
                    return Ok(Some(byte));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Buffered sink over any [`Write`] implementation
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Flush and recover the wrapped writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| e.into_error().into())
    }
}

impl<W: Write> ByteSink for WriterSink<W> {
    fn put_byte(&mut self, byte: u8) -> Result<()> {
        self.writer.write_all(&[byte])?;
        Ok(())
    }

    fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Source adapter lowering ASCII letters; other bytes pass through
#[derive(Debug)]
pub struct FoldCase<S> {
    inner: S,
}

impl<S: ByteSource> FoldCase<S> {
    /// Fold the bytes of `inner`
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: ByteSource> ByteSource for FoldCase<S> {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.inner.next_byte()?.map(|b| b.to_ascii_lowercase()))
    }
}

/// Counts bytes passing through a source or sink
#[derive(Debug)]
pub struct Counted<T> {
    inner: T,
    count: u64,
}

impl<T> Counted<T> {
    /// Start counting from zero
    pub fn new(inner: T) -> Self {
        Self { inner, count: 0 }
    }

    /// Bytes successfully read or written so far
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl<S: ByteSource> ByteSource for Counted<S> {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.inner.next_byte()?;
        self.count += u64::from(byte.is_some());
        Ok(byte)
    }
}

impl<K: ByteSink> ByteSink for Counted<K> {
    fn put_byte(&mut self, byte: u8) -> Result<()> {
        self.inner.put_byte(byte)?;
        self.count += 1;
        Ok(())
    }

    fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.put_bytes(bytes)?;
        self.count += bytes.len() as u64;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NgramError;

    fn drain(mut source: impl ByteSource) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(byte) = source.next_byte().unwrap() {
            out.push(byte);
        }
        out
    }

    #[test]
    fn test_slice_source() {
        let mut source = SliceSource::new(b"abc");
        assert_eq!(source.next_byte().unwrap(), Some(b'a'));
        assert_eq!(drain(&mut source), b"bc");
        assert_eq!(source.next_byte().unwrap(), None);
        assert_eq!(source.next_byte().unwrap(), None);
    }

    #[test]
    fn test_reader_source() {
        let data: &[u8] = b"hello\0world\xff";
        assert_eq!(drain(ReaderSource::new(data)), data);
        assert!(drain(ReaderSource::new(io::empty())).is_empty());
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn test_reader_source_error() {
        let mut source = ReaderSource::new(FailingReader);
        let err = source.next_byte().unwrap_err();
        assert!(matches!(err, NgramError::Io(_)));
    }

    #[test]
    fn test_writer_sink() {
        let mut sink = WriterSink::new(Vec::new());
        sink.put_byte(b'x').unwrap();
        sink.put_bytes(b"yz").unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.into_inner().unwrap(), b"xyz");
    }

    #[test]
    fn test_vec_sink() {
        let mut sink = Vec::new();
        sink.put_bytes(b"ab").unwrap();
        sink.put_byte(0).unwrap();
        assert_eq!(sink, b"ab\0");
    }

    #[test]
    fn test_fold_case() {
        let folded = drain(FoldCase::new(SliceSource::new(b"Hello WORLD \xC4")));
        assert_eq!(folded, b"hello world \xC4");
    }

    #[test]
    fn test_counted() {
        let mut source = Counted::new(SliceSource::new(b"four"));
        drain(&mut source);
        assert_eq!(source.count(), 4);

        let mut sink = Counted::new(Vec::new());
        sink.put_bytes(b"abc").unwrap();
        sink.put_byte(b'd').unwrap();
        assert_eq!(sink.count(), 4);
    }
}
