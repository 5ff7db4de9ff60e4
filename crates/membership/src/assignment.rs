//! Assignment records and the per-account snapshot they are read through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use skyroster_core::{AccountId, AggregateRoot, AssignmentId, Entity, StateId};

use crate::state::StateCategory;

/// One application of a state to an account.
///
/// Rows are append-only history: removing a state closes the row by stamping
/// `end_at`, it never deletes it. A row with no `end_at` is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateAssignment {
    pub id: AssignmentId,
    pub account_id: AccountId,
    pub state_id: StateId,
    /// Category copied from the definition at assignment time, so stores can
    /// answer category-scoped queries without a catalog lookup.
    pub category: StateCategory,
    /// Region code of the membership, carried by permanent assignments only.
    pub region: Option<String>,
    /// Division code of the membership, carried by permanent assignments only.
    pub division: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: Option<DateTime<Utc>>,
}

impl StateAssignment {
    pub fn is_active(&self) -> bool {
        self.end_at.is_none()
    }

    /// Stamp the end of the assignment. `end_at` is written once; a row
    /// that already ended keeps its original timestamp.
    pub fn close(&mut self, at: DateTime<Utc>) {
        if self.end_at.is_none() {
            self.end_at = Some(at);
        }
    }
}

impl Entity for StateAssignment {
    type Id = AssignmentId;

    fn id(&self) -> &AssignmentId {
        &self.id
    }
}

/// Snapshot of one account's assignment rows at a store revision.
///
/// The snapshot is what mutation planning reads, and `revision` is what the
/// resulting commit is conditioned on: if another writer slips in between,
/// the revision moved and the commit is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountStates {
    account_id: AccountId,
    assignments: Vec<StateAssignment>,
    revision: u64,
}

impl AccountStates {
    /// Snapshot from rows in creation order.
    pub fn new(account_id: AccountId, assignments: Vec<StateAssignment>, revision: u64) -> Self {
        Self {
            account_id,
            assignments,
            revision,
        }
    }

    /// Snapshot of an account with no history yet.
    pub fn empty(account_id: AccountId) -> Self {
        Self::new(account_id, Vec::new(), 0)
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Full history, closed rows included, in creation order.
    pub fn assignments(&self) -> &[StateAssignment] {
        &self.assignments
    }

    /// Full history, consumed.
    pub fn into_assignments(self) -> Vec<StateAssignment> {
        self.assignments
    }

    pub fn active(&self) -> impl Iterator<Item = &StateAssignment> {
        self.assignments.iter().filter(|row| row.is_active())
    }

    /// The active row referencing `state_id`, if the account holds one.
    pub fn active_by_state(&self, state_id: StateId) -> Option<&StateAssignment> {
        self.active().find(|row| row.state_id == state_id)
    }

    pub fn active_in_category(
        &self,
        category: StateCategory,
    ) -> impl Iterator<Item = &StateAssignment> {
        self.active().filter(move |row| row.category == category)
    }

    /// The account's active permanent affiliation, if any.
    pub fn active_permanent(&self) -> Option<&StateAssignment> {
        self.active_in_category(StateCategory::Permanent).next()
    }

    /// The state the account currently presents as.
    ///
    /// Temporary assignments shadow the permanent one. Among several active
    /// temporaries the most recently started wins, and when two share a
    /// `start_at` the more recently created row wins.
    pub fn primary(&self) -> Option<&StateAssignment> {
        self.active_in_category(StateCategory::Temporary)
            .max_by_key(|row| row.start_at)
            .or_else(|| self.active_permanent())
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl AggregateRoot for AccountStates {
    type Id = AccountId;

    fn id(&self) -> &AccountId {
        &self.account_id
    }

    fn version(&self) -> u64 {
        self.revision
    }
}
