//! Port for durable assignment storage.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use skyroster_core::{AccountId, AssignmentId, ExpectedVersion, StateId};

use crate::assignment::{AccountStates, StateAssignment};
use crate::state::StateCategory;

/// Assignment store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The account's revision moved since the snapshot was taken.
    #[error("optimistic concurrency check failed: {0}")]
    Concurrency(String),

    /// The plan referenced a row the store does not hold.
    #[error("unknown assignment: {0}")]
    UnknownAssignment(String),

    /// The plan was malformed (wrong account, row already closed, ...).
    #[error("invalid transition plan: {0}")]
    InvalidPlan(String),

    /// The underlying storage failed.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Write set of one ledger mutation.
///
/// Everything in the plan lands in a single per-account transaction: every
/// listed row is closed at `closed_at` and the optional new row is inserted,
/// or nothing changes at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    /// Ids of active rows to close.
    pub close: Vec<AssignmentId>,
    /// Timestamp stamped into `end_at` of every closed row.
    pub closed_at: DateTime<Utc>,
    /// New row to insert, already carrying its `start_at`.
    pub insert: Option<StateAssignment>,
}

impl TransitionPlan {
    /// A plan that closes nothing and inserts nothing.
    pub fn noop(closed_at: DateTime<Utc>) -> Self {
        Self {
            close: Vec::new(),
            closed_at,
            insert: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty() && self.insert.is_none()
    }
}

/// Durable, queryable storage of assignment rows keyed by account.
///
/// Implementations must keep closed rows (history is never deleted), keep
/// rows in creation order, and apply [`TransitionPlan`]s atomically per
/// account under the caller's expected revision.
pub trait AssignmentStore: Send + Sync {
    /// Every row of the account, closed rows included, plus the account's
    /// current revision. Unknown accounts load as an empty snapshot.
    fn load_account(&self, account_id: AccountId) -> Result<AccountStates, StoreError>;

    /// The account's active row referencing `state_id`, if any.
    fn find_active_by_state(
        &self,
        account_id: AccountId,
        state_id: StateId,
    ) -> Result<Option<StateAssignment>, StoreError>;

    /// The account's active rows in `category`, in creation order.
    fn find_active_by_category(
        &self,
        account_id: AccountId,
        category: StateCategory,
    ) -> Result<Vec<StateAssignment>, StoreError>;

    /// All of the account's active rows, in creation order.
    fn active_assignments(&self, account_id: AccountId)
        -> Result<Vec<StateAssignment>, StoreError>;

    /// Atomically apply `plan` to the account, provided its revision still
    /// matches `expected`. Returns the account's new revision.
    fn commit(
        &self,
        account_id: AccountId,
        plan: TransitionPlan,
        expected: ExpectedVersion,
    ) -> Result<u64, StoreError>;
}

impl<S> AssignmentStore for Arc<S>
where
    S: AssignmentStore + ?Sized,
{
    fn load_account(&self, account_id: AccountId) -> Result<AccountStates, StoreError> {
        self.as_ref().load_account(account_id)
    }

    fn find_active_by_state(
        &self,
        account_id: AccountId,
        state_id: StateId,
    ) -> Result<Option<StateAssignment>, StoreError> {
        self.as_ref().find_active_by_state(account_id, state_id)
    }

    fn find_active_by_category(
        &self,
        account_id: AccountId,
        category: StateCategory,
    ) -> Result<Vec<StateAssignment>, StoreError> {
        self.as_ref().find_active_by_category(account_id, category)
    }

    fn active_assignments(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<StateAssignment>, StoreError> {
        self.as_ref().active_assignments(account_id)
    }

    fn commit(
        &self,
        account_id: AccountId,
        plan: TransitionPlan,
        expected: ExpectedVersion,
    ) -> Result<u64, StoreError> {
        self.as_ref().commit(account_id, plan, expected)
    }
}
