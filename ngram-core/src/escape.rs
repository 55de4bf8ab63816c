//! Byte escaping for printed tokens, and the inverse for delimiter lists
//!
//! Printable-byte classification is ASCII only.

use crate::error::{NgramError, Result};
use crate::io::ByteSink;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Escaped rendering of a single byte, at most four bytes long
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Escaped {
    buf: [u8; 4],
    len: u8,
}

impl Escaped {
    fn verbatim(byte: u8) -> Self {
        Self {
            buf: [byte, 0, 0, 0],
            len: 1,
        }
    }

    fn mnemonic(ch: u8) -> Self {
        Self {
            buf: [b'\\', ch, 0, 0],
            len: 2,
        }
    }

    fn hex(byte: u8) -> Self {
        Self {
            buf: [
                b'\\',
                b'x',
                HEX_DIGITS[usize::from(byte >> 4)],
                HEX_DIGITS[usize::from(byte & 0x0F)],
            ],
            len: 4,
        }
    }

    /// The escaped bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..usize::from(self.len)]
    }
}

impl AsRef<[u8]> for Escaped {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Whether `byte` is emitted verbatim: printable ASCII except `\` and `"`
pub fn is_plain(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7E) && byte != b'\\' && byte != b'"'
}

/// Escape one byte
pub fn escape_byte(byte: u8) -> Escaped {
    match byte {
        0x00 => Escaped::mnemonic(b'0'),
        b'\\' => Escaped::mnemonic(b'\\'),
        b'"' => Escaped::mnemonic(b'"'),
        0x07 => Escaped::mnemonic(b'a'),
        0x08 => Escaped::mnemonic(b'b'),
        0x1B => Escaped::mnemonic(b'e'),
        0x0C => Escaped::mnemonic(b'f'),
        b'\n' => Escaped::mnemonic(b'n'),
        b'\r' => Escaped::mnemonic(b'r'),
        b'\t' => Escaped::mnemonic(b't'),
        0x0B => Escaped::mnemonic(b'v'),
        0x20..=0x7E => Escaped::verbatim(byte),
        _ => Escaped::hex(byte),
    }
}

/// Escape every byte of `bytes` into `sink`
///
/// Runs of plain bytes are written in one call.
pub fn escape_into<K: ByteSink + ?Sized>(bytes: &[u8], sink: &mut K) -> Result<()> {
    let mut start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        if is_plain(byte) {
            continue;
        }
        if start < i {
            sink.put_bytes(&bytes[start..i])?;
        }
        sink.put_bytes(escape_byte(byte).as_bytes())?;
        start = i + 1;
    }
    if start < bytes.len() {
        sink.put_bytes(&bytes[start..])?;
    }
    Ok(())
}

/// Escape `bytes` into a new buffer
pub fn escape(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for &byte in bytes {
        out.extend_from_slice(escape_byte(byte).as_bytes());
    }
    out
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Decode an escaped byte list such as `" \t,\x00"`
///
/// Accepts the same mnemonics [`escape_byte`] produces plus `\xH` and `\xHH`.
/// Any other escaped character stands for itself. A trailing lone backslash
/// is kept literally.
pub fn unescape(input: &str) -> Result<Vec<u8>> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        i += 1;
        if byte != b'\\' {
            out.push(byte);
            continue;
        }
        let Some(&code) = bytes.get(i) else {
            out.push(b'\\');
            break;
        };
        i += 1;
        let decoded = match code {
            b'0' => 0x00,
            b'a' => 0x07,
            b'b' => 0x08,
            b'e' => 0x1B,
            b'f' => 0x0C,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'v' => 0x0B,
            b'x' => {
                let high = bytes.get(i).copied().and_then(hex_value).ok_or_else(|| {
                    NgramError::config(format!("invalid hex escape in {input:?}"))
                })?;
                i += 1;
                match bytes.get(i).copied().and_then(hex_value) {
                    Some(low) => {
                        i += 1;
                        (high << 4) | low
                    }
                    None => high,
                }
            }
            other => other,
        };
        out.push(decoded);
    }
    Ok(out)
}
