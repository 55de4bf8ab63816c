//! Sliding window over the most recent tokens

use crate::error::Result;
use crate::tokenizer::Token;
use std::collections::VecDeque;

/// When a window that has not yet filled up is inserted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum WarmUp {
    /// Insert the shorter leading windows while the window fills
    #[default]
    Partial,
    /// Insert nothing until `capacity` tokens have arrived
    Skip,
}

/// Bounded FIFO of the last `capacity` tokens
///
/// Holds at most `capacity` tokens; pushing into a full window evicts the
/// oldest one.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    tokens: VecDeque<Token>,
    capacity: usize,
    warm_up: WarmUp,
}

impl SlidingWindow {
    /// Create an empty window; `capacity` must be at least 1
    ///
    /// Storage grows with the tokens actually held, not with `capacity`.
    pub fn new(capacity: usize, warm_up: WarmUp) -> Self {
        debug_assert!(capacity >= 1);
        Self {
            tokens: VecDeque::new(),
            capacity,
            warm_up,
        }
    }

    /// Append `token`, evicting the oldest if full
    ///
    /// Returns whether the window is now ready to be inserted.
    pub fn push(&mut self, token: Token) -> Result<bool> {
        if self.tokens.len() == self.capacity {
            self.tokens.pop_front();
        } else {
            self.tokens.try_reserve(1)?;
        }
        self.tokens.push_back(token);
        Ok(self.is_ready())
    }

    /// Whether the current contents should be inserted
    pub fn is_ready(&self) -> bool {
        match self.warm_up {
            WarmUp::Partial => !self.tokens.is_empty(),
            WarmUp::Skip => self.tokens.len() == self.capacity,
        }
    }

    /// Contents, oldest first
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Token> + '_ {
        self.tokens.iter()
    }

    /// Tokens currently held
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Nothing pushed yet
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Maximum number of tokens held
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
