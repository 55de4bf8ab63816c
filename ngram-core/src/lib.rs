//! N-gram frequency counting over arbitrary byte streams
//!
//! Input bytes are cut into tokens, either on a set of delimiter bytes or
//! into fixed-width chunks. A sliding window over the most recent tokens is
//! inserted into a sorted trie, so every node counts how often its path from
//! the root occurred as an overlapping n-gram. The finished trie is printed
//! either as an indented tree or as one `count path` line per n-gram, with
//! non-printable bytes escaped.
//!
//! # Architecture
//!
//! - [`io`]: byte source and sink traits with `std::io` adapters
//! - [`tokenizer`]: delimiter and fixed-width tokenization
//! - [`window`]: sliding window of the last `max_order` tokens
//! - [`trie`]: arena-backed sorted trie with parent links
//! - [`printer`] and [`escape`]: tree and flat rendering
//! - [`processor`]: the whole pipeline with run statistics
//! - [`histogram`]: byte value histogram
//!
//! # Example
//!
//! ```rust
//! use ngram_core::{BuildConfig, DelimiterSet, NgramProcessor, PrintConfig, SliceSource};
//!
//! let build = BuildConfig::builder()
//!     .max_order(2)
//!     .delimiters(DelimiterSet::whitespace())
//!     .build()
//!     .unwrap();
//! let print = PrintConfig::builder().min_order(2).max_order(2).build().unwrap();
//! let processor = NgramProcessor::new(build, print).unwrap();
//!
//! let mut out = Vec::new();
//! processor
//!     .process(SliceSource::new(b"to be or not to be"), &mut out)
//!     .unwrap();
//!
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.contains("2 \"to\" \"be\"\n"));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod escape;
pub mod histogram;
pub mod io;
pub mod printer;
pub mod processor;
pub mod tokenizer;
pub mod trie;
pub mod window;

pub use config::{BuildConfig, BuildConfigBuilder, Layout, PrintConfig, PrintConfigBuilder};
pub use error::{NgramError, Result};
pub use escape::{escape, escape_byte, unescape};
pub use histogram::ByteHistogram;
pub use io::{ByteSink, ByteSource, Counted, FoldCase, ReaderSource, SliceSource, WriterSink};
pub use printer::Printer;
pub use processor::{build_trie, NgramProcessor, ProcessingStats};
pub use tokenizer::{DelimiterSet, Token, TokenMode, Tokenizer};
pub use trie::{NodeId, NodeRef, Trie};
pub use window::{SlidingWindow, WarmUp};
