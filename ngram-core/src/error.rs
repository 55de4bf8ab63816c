//! Error types for the n-gram engine

use thiserror::Error;

/// Errors raised while tokenizing, building or printing
#[derive(Debug, Error)]
pub enum NgramError {
    /// A node or token buffer could not be reserved
    #[error("allocation failure")]
    AllocationFailure,

    /// The byte source or sink reported an error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rejected before any I/O takes place
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl NgramError {
    /// Shorthand for an [`NgramError::InvalidConfiguration`]
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        NgramError::InvalidConfiguration(msg.into())
    }
}

impl From<std::collections::TryReserveError> for NgramError {
    fn from(_: std::collections::TryReserveError) -> Self {
        NgramError::AllocationFailure
    }
}

impl From<smallvec::CollectionAllocErr> for NgramError {
    fn from(_: smallvec::CollectionAllocErr) -> Self {
        NgramError::AllocationFailure
    }
}

/// Result type for n-gram operations
pub type Result<T> = std::result::Result<T, NgramError>;
