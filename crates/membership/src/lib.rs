//! skyroster-membership: the account state ledger.
//!
//! Accounts hold one long-lived permanent affiliation and any number of
//! stacked temporary overrides. This crate owns the rules of that ledger:
//! assignment planning, supersession, duplicate detection, primary-state
//! resolution. Storage, catalog and clock are ports; implementations live
//! in the infra crate.

pub mod assignment;
pub mod catalog;
pub mod error;
pub mod ledger;
pub mod state;
pub mod store;
pub mod transition;

pub use assignment::{AccountStates, StateAssignment};
pub use catalog::{CatalogError, StateCatalog};
pub use error::MembershipError;
pub use ledger::MembershipLedger;
pub use state::{StateCategory, StateDefinition};
pub use store::{AssignmentStore, StoreError, TransitionPlan};
pub use transition::{AddStatePlan, plan_add_state, plan_remove_state};
