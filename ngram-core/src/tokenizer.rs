//! Byte stream tokenizer
//!
//! Splits a [`ByteSource`] into tokens either on delimiter bytes or into
//! fixed-width chunks. Tokens are produced lazily through [`Iterator`].

use crate::error::{NgramError, Result};
use crate::io::ByteSource;
use smallvec::SmallVec;
use std::fmt;
use std::num::NonZeroUsize;

/// Tokens up to this many bytes are stored inline
pub const INLINE_TOKEN_BYTES: usize = 16;

/// Token bytes, inline for short tokens
pub type TokenBytes = SmallVec<[u8; INLINE_TOKEN_BYTES]>;

/// An immutable, non-empty run of bytes
///
/// Ordering is lexicographic over the raw bytes; when one token is a prefix
/// of the other the shorter one sorts first.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(TokenBytes);

impl Token {
    /// Copy `bytes` into a new token
    pub fn new(bytes: &[u8]) -> Result<Self> {
        let mut buf = TokenBytes::new();
        buf.try_reserve(bytes.len())?;
        buf.extend_from_slice(bytes);
        Ok(Self(buf))
    }

    /// The token's bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Only the synthetic trie root is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn empty() -> Self {
        Self(TokenBytes::new())
    }

    fn from_buf(buf: TokenBytes) -> Self {
        Self(buf)
    }
}

impl AsRef<[u8]> for Token {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(\"{}\")", self.0.escape_ascii())
    }
}

/// Membership table over all 256 byte values
#[derive(Clone, PartialEq, Eq)]
pub struct DelimiterSet {
    table: [bool; 256],
    len: usize,
}

impl DelimiterSet {
    /// Build a set from raw bytes; duplicates are ignored
    pub fn new(bytes: &[u8]) -> Self {
        let mut table = [false; 256];
        let mut len = 0;
        for &byte in bytes {
            if !table[usize::from(byte)] {
                table[usize::from(byte)] = true;
                len += 1;
            }
        }
        Self { table, len }
    }

    /// Space, tab, newline, carriage return, vertical tab and form feed
    pub fn whitespace() -> Self {
        Self::new(b" \t\n\r\x0B\x0C")
    }

    /// Whether `byte` splits tokens
    #[inline]
    pub fn contains(&self, byte: u8) -> bool {
        self.table[usize::from(byte)]
    }

    /// Number of distinct delimiter bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// An empty set cannot split anything
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Member bytes in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(move |&b| self.contains(b))
    }
}

impl fmt::Debug for DelimiterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<u8> = self.iter().collect();
        write!(f, "DelimiterSet(\"{}\")", members.escape_ascii())
    }
}

/// How the byte stream is cut into tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenMode {
    /// Split on any byte in the set; empty runs are skipped
    Delimited(DelimiterSet),
    /// Exactly `n` bytes per token; a short trailing chunk is dropped
    FixedWidth(NonZeroUsize),
}

/// Lazy token stream over a byte source
///
/// Yields `Err` at most once; the stream is fused after an error or end of
/// input.
pub struct Tokenizer<S> {
    source: S,
    mode: TokenMode,
    done: bool,
    emitted: u64,
}

impl<S: ByteSource> Tokenizer<S> {
    /// Tokenize `source` according to `mode`
    pub fn new(source: S, mode: TokenMode) -> Self {
        Self {
            source,
            mode,
            done: false,
            emitted: 0,
        }
    }

    /// Tokens produced so far
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

/// Next run of non-delimiter bytes; sets `eof` once the source is drained
fn read_delimited<S: ByteSource>(
    source: &mut S,
    delimiters: &DelimiterSet,
    eof: &mut bool,
) -> Result<Option<Token>> {
    let mut buf = TokenBytes::new();
    loop {
        match source.next_byte()? {
            None => break,
            Some(byte) if delimiters.contains(byte) => {
                if buf.is_empty() {
                    continue;
                }
                return Ok(Some(Token::from_buf(buf)));
            }
            Some(byte) => {
                buf.try_reserve(1)?;
                buf.push(byte);
            }
        }
    }
    *eof = true;
    Ok((!buf.is_empty()).then(|| Token::from_buf(buf)))
}

/// Next `width` bytes; a short tail is dropped
fn read_fixed<S: ByteSource>(source: &mut S, width: usize, eof: &mut bool) -> Result<Option<Token>> {
    let mut buf = TokenBytes::new();
    buf.try_reserve(width)?;
    while buf.len() < width {
        match source.next_byte()? {
            Some(byte) => buf.push(byte),
            None => {
                *eof = true;
                if !buf.is_empty() {
                    log::trace!("discarding {} byte trailing chunk", buf.len());
                }
                return Ok(None);
            }
        }
    }
    Ok(Some(Token::from_buf(buf)))
}

impl<S: ByteSource> Iterator for Tokenizer<S> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = match &self.mode {
            TokenMode::Delimited(set) => read_delimited(&mut self.source, set, &mut self.done),
            TokenMode::FixedWidth(width) => read_fixed(&mut self.source, width.get(), &mut self.done),
        };
        match result {
            Ok(Some(token)) => {
                self.emitted += 1;
                Some(Ok(token))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<S> fmt::Debug for Tokenizer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("mode", &self.mode)
            .field("done", &self.done)
            .field("emitted", &self.emitted)
            .finish()
    }
}

/// Validate a delimiter set for tokenization
pub(crate) fn check_delimiters(set: &DelimiterSet) -> Result<()> {
    if set.is_empty() {
        return Err(NgramError::config("delimiter set must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::SliceSource;

    fn tokens(input: &[u8], mode: TokenMode) -> Vec<Vec<u8>> {
        Tokenizer::new(SliceSource::new(input), mode)
            .map(|t| t.unwrap().as_bytes().to_vec())
            .collect()
    }

    fn delimited(set: &[u8]) -> TokenMode {
        TokenMode::Delimited(DelimiterSet::new(set))
    }

    fn fixed(width: usize) -> TokenMode {
        TokenMode::FixedWidth(NonZeroUsize::new(width).unwrap())
    }

    #[test]
    fn test_delimited_basic() {
        assert_eq!(
            tokens(b"aa bb cc", delimited(b" ")),
            vec![b"aa".to_vec(), b"bb".to_vec(), b"cc".to_vec()]
        );
    }

    #[test]
    fn test_delimited_collapses_runs() {
        assert_eq!(
            tokens(b"  aa \t\n bb\n\n", TokenMode::Delimited(DelimiterSet::whitespace())),
            vec![b"aa".to_vec(), b"bb".to_vec()]
        );
    }

    #[test]
    fn test_delimited_only_delimiters() {
        assert!(tokens(b",,,,", delimited(b",")).is_empty());
    }

    #[test]
    fn test_delimited_binary_delimiter() {
        assert_eq!(
            tokens(b"a\0b\0\0c", delimited(b"\0")),
            vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]
        );
    }

    #[test]
    fn test_fixed_width_discards_partial() {
        let toks = tokens(b"abcdefg", fixed(3));
        assert_eq!(toks, vec![b"abc".to_vec(), b"def".to_vec()]);
    }

    #[test]
    fn test_fixed_width_exact() {
        assert_eq!(tokens(b"abcd", fixed(2)).len(), 2);
        assert_eq!(tokens(b"abcd", fixed(1)).len(), 4);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokens(b"", delimited(b" ")).is_empty());
        assert!(tokens(b"", fixed(4)).is_empty());
    }

    #[test]
    fn test_long_token_spills_inline_storage() {
        let word = vec![b'x'; INLINE_TOKEN_BYTES * 4];
        let mut input = word.clone();
        input.push(b' ');
        assert_eq!(tokens(&input, delimited(b" ")), vec![word]);
    }

    #[test]
    fn test_emitted_counter_and_fuse() {
        let mut tokenizer = Tokenizer::new(SliceSource::new(b"a b"), delimited(b" "));
        assert!(tokenizer.next().is_some());
        assert!(tokenizer.next().is_some());
        assert!(tokenizer.next().is_none());
        assert!(tokenizer.next().is_none());
        assert_eq!(tokenizer.emitted(), 2);
    }

    #[test]
    fn test_token_ordering() {
        let a = Token::new(b"ab").unwrap();
        let b = Token::new(b"abc").unwrap();
        let c = Token::new(b"b").unwrap();
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a, Token::new(b"ab").unwrap());
    }

    #[test]
    fn test_delimiter_set() {
        let set = DelimiterSet::new(b"aab");
        assert_eq!(set.len(), 2);
        assert!(set.contains(b'a'));
        assert!(!set.contains(b'c'));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![b'a', b'b']);
        assert!(check_delimiters(&DelimiterSet::new(b"")).is_err());
        assert_eq!(DelimiterSet::whitespace().len(), 6);
    }

    #[test]
    fn test_unreservable_chunk_fails_once() {
        let mut tokenizer = Tokenizer::new(SliceSource::new(b"abc"), fixed(usize::MAX));
        assert!(matches!(tokenizer.next(), Some(Err(NgramError::AllocationFailure))));
        assert!(tokenizer.next().is_none());
        assert_eq!(tokenizer.emitted(), 0);
    }
}
