//! Error taxonomy of the membership ledger.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::store::StoreError;

/// Everything a ledger operation can fail with.
///
/// Store failures pass through unchanged so callers can distinguish a lost
/// optimistic-concurrency race from a rejected mutation and decide their own
/// retry policy.
#[derive(Debug, Error)]
pub enum MembershipError {
    /// The supplied definition is not an entry of the configured catalog.
    #[error("not a recognized state: {0}")]
    InvalidState(String),

    /// The account already holds an active assignment of this state.
    #[error("account already holds an active '{0}' state")]
    DuplicateState(String),

    /// Deterministic input validation failure.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Catalog lookup failure.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Assignment store failure, surfaced unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl MembershipError {
    pub fn validation(message: impl Into<String>) -> Self {
        MembershipError::Validation(message.into())
    }
}
