//! Build and print configuration

use crate::error::{NgramError, Result};
use crate::tokenizer::{check_delimiters, DelimiterSet, TokenMode};
use crate::window::WarmUp;
use std::num::NonZeroUsize;

/// Default configuration constants
pub mod defaults {
    /// Default minimum and maximum n-gram order
    pub const ORDER: usize = 1;

    /// Default separator between count and n-gram
    pub const SEPARATOR: u8 = b' ';

    /// Chunk width used when no delimiters are given
    pub const CHUNK_WIDTH: usize = 1;
}

/// How the trie is built from the byte stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub(crate) max_order: usize,
    pub(crate) mode: TokenMode,
    pub(crate) warm_up: WarmUp,
}

impl BuildConfig {
    /// Create a configuration builder
    pub fn builder() -> BuildConfigBuilder {
        BuildConfigBuilder::default()
    }

    /// Longest n-gram recorded
    pub fn max_order(&self) -> usize {
        self.max_order
    }

    /// Tokenization mode
    pub fn mode(&self) -> &TokenMode {
        &self.mode
    }

    /// Leading window policy
    pub fn warm_up(&self) -> WarmUp {
        self.warm_up
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_order == 0 {
            return Err(NgramError::config("max order must be greater than 0"));
        }
        if let TokenMode::Delimited(set) = &self.mode {
            check_delimiters(set)?;
        }
        Ok(())
    }
}

/// Fluent builder for [`BuildConfig`]
///
/// Exactly one of [`delimiters`](Self::delimiters) and
/// [`chunk_width`](Self::chunk_width) must be set.
#[derive(Debug, Default)]
pub struct BuildConfigBuilder {
    max_order: Option<usize>,
    delimiters: Option<DelimiterSet>,
    chunk_width: Option<usize>,
    warm_up: WarmUp,
}

impl BuildConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the longest n-gram recorded
    pub fn max_order(mut self, order: usize) -> Self {
        self.max_order = Some(order);
        self
    }

    /// Split tokens on these bytes
    pub fn delimiters(mut self, set: DelimiterSet) -> Self {
        self.delimiters = Some(set);
        self
    }

    /// Cut tokens into chunks of `width` bytes
    pub fn chunk_width(mut self, width: usize) -> Self {
        self.chunk_width = Some(width);
        self
    }

    /// Set the leading window policy
    pub fn warm_up(mut self, warm_up: WarmUp) -> Self {
        self.warm_up = warm_up;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<BuildConfig> {
        let mode = match (self.delimiters, self.chunk_width) {
            (Some(set), None) => TokenMode::Delimited(set),
            (None, Some(width)) => TokenMode::FixedWidth(
                NonZeroUsize::new(width)
                    .ok_or_else(|| NgramError::config("chunk width must be greater than 0"))?,
            ),
            (Some(_), Some(_)) => {
                return Err(NgramError::config(
                    "delimiters and chunk width are mutually exclusive",
                ))
            }
            (None, None) => {
                return Err(NgramError::config(
                    "either delimiters or a chunk width is required",
                ))
            }
        };

        let config = BuildConfig {
            max_order: self.max_order.unwrap_or(defaults::ORDER),
            mode,
            warm_up: self.warm_up,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Output layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Layout {
    /// Indented tree, one node per line
    Tree,
    /// One `count path` line per qualifying node
    #[default]
    Flat,
}

/// How the trie is printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintConfig {
    pub(crate) min_order: usize,
    pub(crate) max_order: usize,
    pub(crate) layout: Layout,
    pub(crate) merge: bool,
    pub(crate) separator: u8,
    pub(crate) fold_case: bool,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            min_order: defaults::ORDER,
            max_order: defaults::ORDER,
            layout: Layout::default(),
            merge: false,
            separator: defaults::SEPARATOR,
            fold_case: false,
        }
    }
}

impl PrintConfig {
    /// Create a configuration builder
    pub fn builder() -> PrintConfigBuilder {
        PrintConfigBuilder::default()
    }

    /// Shortest n-gram printed with a count
    pub fn min_order(&self) -> usize {
        self.min_order
    }

    /// Longest n-gram printed
    pub fn max_order(&self) -> usize {
        self.max_order
    }

    /// Tree or flat output
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Emit each n-gram as one unquoted run
    pub fn merge(&self) -> bool {
        self.merge
    }

    /// Byte between count and n-gram, and between quoted tokens
    pub fn separator(&self) -> u8 {
        self.separator
    }

    /// Lower ASCII letters before tokenizing
    ///
    /// Applied to the byte source by the processor; the printer never folds.
    pub fn fold_case(&self) -> bool {
        self.fold_case
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.min_order == 0 {
            return Err(NgramError::config("min order must be greater than 0"));
        }
        if self.min_order > self.max_order {
            return Err(NgramError::config(format!(
                "min order {} exceeds max order {}",
                self.min_order, self.max_order
            )));
        }
        Ok(())
    }
}

/// Fluent builder for [`PrintConfig`]
#[derive(Debug, Default)]
pub struct PrintConfigBuilder {
    min_order: Option<usize>,
    max_order: Option<usize>,
    layout: Option<Layout>,
    merge: Option<bool>,
    separator: Option<u8>,
    fold_case: Option<bool>,
}

impl PrintConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shortest n-gram printed with a count
    pub fn min_order(mut self, order: usize) -> Self {
        self.min_order = Some(order);
        self
    }

    /// Set the longest n-gram printed; defaults to the minimum
    pub fn max_order(mut self, order: usize) -> Self {
        self.max_order = Some(order);
        self
    }

    /// Set the layout
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Toggle merge mode
    pub fn merge(mut self, merge: bool) -> Self {
        self.merge = Some(merge);
        self
    }

    /// Set the separator byte
    pub fn separator(mut self, separator: u8) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Toggle ASCII case folding of the input
    pub fn fold_case(mut self, fold_case: bool) -> Self {
        self.fold_case = Some(fold_case);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<PrintConfig> {
        let mut config = PrintConfig::default();

        if let Some(min) = self.min_order {
            config.min_order = min;
        }
        config.max_order = self.max_order.unwrap_or(config.min_order);
        if let Some(layout) = self.layout {
            config.layout = layout;
        }
        if let Some(merge) = self.merge {
            config.merge = merge;
        }
        if let Some(separator) = self.separator {
            config.separator = separator;
        }
        if let Some(fold_case) = self.fold_case {
            config.fold_case = fold_case;
        }

        config.validate()?;
        Ok(config)
    }
}
