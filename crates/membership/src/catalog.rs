//! Port for the externally owned state catalog.

use std::sync::Arc;

use thiserror::Error;

use crate::state::StateDefinition;

/// Catalog lookup failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No definition carries the requested code.
    #[error("unknown state code: {0}")]
    UnknownCode(String),
}

/// Read-only lookup of state definitions.
///
/// The catalog is managed elsewhere; the ledger consumes it through this
/// trait so the catalog backing can change without touching ledger logic.
pub trait StateCatalog: Send + Sync {
    /// The definition carrying `code`.
    fn find_by_code(&self, code: &str) -> Result<StateDefinition, CatalogError>;

    /// Whether `definition` is an entry of this catalog.
    ///
    /// A definition is recognized when the catalog holds an entry with the
    /// same id that agrees on code and category. Hand-built or stale
    /// definitions are not recognized.
    fn recognizes(&self, definition: &StateDefinition) -> bool;
}

impl<C> StateCatalog for Arc<C>
where
    C: StateCatalog + ?Sized,
{
    fn find_by_code(&self, code: &str) -> Result<StateDefinition, CatalogError> {
        self.as_ref().find_by_code(code)
    }

    fn recognizes(&self, definition: &StateDefinition) -> bool {
        self.as_ref().recognizes(definition)
    }
}
