//! Catalog-side description of assignable states.

use serde::{Deserialize, Serialize};

use skyroster_core::{Entity, StateId};

/// How long an assignment of a state is expected to live, and how many of
/// them an account may hold at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateCategory {
    /// Long-lived affiliation. An account holds at most one active
    /// permanent assignment; assigning a new one retires the old.
    Permanent,
    /// Time-bounded override. Any number may be active concurrently and
    /// they stack on top of the permanent affiliation.
    Temporary,
}

impl StateCategory {
    pub fn is_permanent(&self) -> bool {
        matches!(self, StateCategory::Permanent)
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self, StateCategory::Temporary)
    }
}

impl std::fmt::Display for StateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateCategory::Permanent => write!(f, "permanent"),
            StateCategory::Temporary => write!(f, "temporary"),
        }
    }
}

/// One entry of the state catalog.
///
/// Definitions are owned and managed outside the ledger; the ledger only
/// reads them to decide how an assignment behaves. `code` is the symbolic
/// handle callers use ("DIVISION", "VISITING", ...), unique per catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDefinition {
    pub id: StateId,
    pub code: String,
    pub name: String,
    pub category: StateCategory,
    /// When set, assigning this state also retires every active temporary
    /// assignment the account holds.
    #[serde(default)]
    pub clears_temporaries: bool,
}

impl StateDefinition {
    pub fn new(
        id: StateId,
        code: impl Into<String>,
        name: impl Into<String>,
        category: StateCategory,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            category,
            clears_temporaries: false,
        }
    }

    /// A fresh permanent definition with a generated id.
    pub fn permanent(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(StateId::new(), code, name, StateCategory::Permanent)
    }

    /// A fresh temporary definition with a generated id.
    pub fn temporary(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(StateId::new(), code, name, StateCategory::Temporary)
    }

    pub fn with_clears_temporaries(mut self, clears: bool) -> Self {
        self.clears_temporaries = clears;
        self
    }

    pub fn is_permanent(&self) -> bool {
        self.category.is_permanent()
    }

    pub fn is_temporary(&self) -> bool {
        self.category.is_temporary()
    }
}

impl Entity for StateDefinition {
    type Id = StateId;

    fn id(&self) -> &StateId {
        &self.id
    }
}
