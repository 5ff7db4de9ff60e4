//! State catalog backing.

use std::collections::HashMap;

use anyhow::Context;
use serde::Deserialize;

use skyroster_core::StateId;
use skyroster_membership::{CatalogError, StateCatalog, StateCategory, StateDefinition};

/// In-memory state catalog, keyed by symbolic code.
#[derive(Debug, Default)]
pub struct InMemoryStateCatalog {
    by_code: HashMap<String, StateDefinition>,
}

impl InMemoryStateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the given definitions. A later definition with an
    /// already-present code replaces the earlier one.
    pub fn with_definitions(definitions: impl IntoIterator<Item = StateDefinition>) -> Self {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.insert(definition);
        }
        catalog
    }

    pub fn insert(&mut self, definition: StateDefinition) {
        self.by_code.insert(definition.code.clone(), definition);
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

impl StateCatalog for InMemoryStateCatalog {
    fn find_by_code(&self, code: &str) -> Result<StateDefinition, CatalogError> {
        self.by_code
            .get(code)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownCode(code.to_string()))
    }

    fn recognizes(&self, definition: &StateDefinition) -> bool {
        self.by_code
            .get(&definition.code)
            .is_some_and(|known| known.id == definition.id && known.category == definition.category)
    }
}

/// One catalog entry as it appears in a seed document.
#[derive(Debug, Deserialize)]
struct StateSeed {
    code: String,
    name: String,
    category: StateCategory,
    #[serde(default)]
    clears_temporaries: bool,
}

/// Build a catalog from a JSON seed document: an array of entries carrying
/// `code`, `name`, `category` and an optional `clears_temporaries` flag.
/// Ids are minted at load time; codes are the stable handle.
pub fn catalog_from_json(json: &str) -> anyhow::Result<InMemoryStateCatalog> {
    let seeds: Vec<StateSeed> =
        serde_json::from_str(json).context("malformed state catalog document")?;

    let definitions = seeds.into_iter().map(|seed| {
        StateDefinition::new(StateId::new(), seed.code, seed.name, seed.category)
            .with_clears_temporaries(seed.clears_temporaries)
    });
    Ok(InMemoryStateCatalog::with_definitions(definitions))
}
