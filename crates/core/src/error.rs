//! Shared error model of the foundation layer.

use thiserror::Error;

/// Result type used by the foundation primitives.
pub type DomainResult<T> = Result<T, DomainError>;

/// Failures of the foundation primitives themselves.
///
/// Domain modules carry their own richer taxonomies (the membership crate's
/// ledger and store errors); this enum covers only what the shared
/// identifier and versioning types can fail with.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A version expectation did not hold (stale snapshot).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
