//! Infrastructure layer: storage adapters, catalog backing, clock control.

pub mod assignment_store;
pub mod catalog;
pub mod clock;


pub use assignment_store::InMemoryAssignmentStore;
pub use catalog::{InMemoryStateCatalog, catalog_from_json};
pub use clock::ManualClock;
