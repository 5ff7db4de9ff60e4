//! Ledger orchestration over the store, catalog and clock ports.

use skyroster_core::{AccountId, Clock, ExpectedVersion};

use crate::assignment::StateAssignment;
use crate::catalog::StateCatalog;
use crate::error::MembershipError;
use crate::state::{StateCategory, StateDefinition};
use crate::store::{AssignmentStore, TransitionPlan};
use crate::transition;

/// Front door of the membership ledger.
///
/// Every mutation follows one shape: load the account snapshot, plan the
/// write set against it, commit the plan conditioned on the snapshot's
/// revision. A commit that loses the revision race surfaces
/// [`StoreError::Concurrency`](crate::store::StoreError::Concurrency)
/// unchanged; the ledger never retries on its own.
pub struct MembershipLedger<S, C, K> {
    store: S,
    catalog: C,
    clock: K,
}

impl<S, C, K> MembershipLedger<S, C, K>
where
    S: AssignmentStore,
    C: StateCatalog,
    K: Clock,
{
    pub fn new(store: S, catalog: C, clock: K) -> Self {
        Self {
            store,
            catalog,
            clock,
        }
    }

    /// Assign a state to an account.
    ///
    /// A permanent assignment carries the account's membership (`region` and
    /// `division` codes, both required) and retires any previous permanent
    /// assignment. A temporary assignment ignores the membership codes and
    /// stacks on whatever is already held. When the definition clears
    /// temporaries, every active temporary assignment is retired in the same
    /// commit. Returns the created row.
    pub fn add_state(
        &self,
        account_id: AccountId,
        definition: &StateDefinition,
        region: Option<&str>,
        division: Option<&str>,
    ) -> Result<StateAssignment, MembershipError> {
        self.ensure_recognized(definition)?;

        let account = self.store.load_account(account_id)?;
        let now = self.clock.now();
        let plan = transition::plan_add_state(&account, definition, region, division, now)?;

        let transition = TransitionPlan {
            close: plan.supersede.clone(),
            closed_at: now,
            insert: Some(plan.assignment.clone()),
        };
        self.store.commit(
            account_id,
            transition,
            ExpectedVersion::Exact(account.revision()),
        )?;

        tracing::info!(
            "Assigned state '{}' to account {} (retired {} assignment(s))",
            definition.code,
            account_id,
            plan.supersede.len()
        );
        Ok(plan.assignment)
    }

    /// Assign a state looked up by its catalog code.
    pub fn add_state_by_code(
        &self,
        account_id: AccountId,
        code: &str,
        region: Option<&str>,
        division: Option<&str>,
    ) -> Result<StateAssignment, MembershipError> {
        let definition = self.catalog.find_by_code(code)?;
        self.add_state(account_id, &definition, region, division)
    }

    /// Remove a state from an account.
    ///
    /// Closes the active row and returns it with its `end_at` stamped.
    /// Removing a state the account does not hold changes nothing and
    /// returns `None`.
    pub fn remove_state(
        &self,
        account_id: AccountId,
        definition: &StateDefinition,
    ) -> Result<Option<StateAssignment>, MembershipError> {
        self.ensure_recognized(definition)?;

        let account = self.store.load_account(account_id)?;
        let Some(active) = transition::plan_remove_state(&account, definition) else {
            tracing::debug!(
                "Account {} does not hold state '{}', nothing to remove",
                account_id,
                definition.code
            );
            return Ok(None);
        };
        let mut closed = active.clone();

        let now = self.clock.now();
        let transition = TransitionPlan {
            close: vec![closed.id],
            closed_at: now,
            insert: None,
        };
        self.store.commit(
            account_id,
            transition,
            ExpectedVersion::Exact(account.revision()),
        )?;

        closed.close(now);
        tracing::info!(
            "Removed state '{}' from account {}",
            definition.code,
            account_id
        );
        Ok(Some(closed))
    }

    /// Remove a state looked up by its catalog code.
    pub fn remove_state_by_code(
        &self,
        account_id: AccountId,
        code: &str,
    ) -> Result<Option<StateAssignment>, MembershipError> {
        let definition = self.catalog.find_by_code(code)?;
        self.remove_state(account_id, &definition)
    }

    /// Whether the account actively holds the state.
    pub fn has_state(
        &self,
        account_id: AccountId,
        definition: &StateDefinition,
    ) -> Result<bool, MembershipError> {
        self.ensure_recognized(definition)?;
        Ok(self
            .store
            .find_active_by_state(account_id, definition.id)?
            .is_some())
    }

    /// The state the account currently presents as. Temporary assignments
    /// shadow the permanent one; see
    /// [`AccountStates::primary`](crate::assignment::AccountStates::primary)
    /// for the precedence rules.
    pub fn primary_state(
        &self,
        account_id: AccountId,
    ) -> Result<Option<StateAssignment>, MembershipError> {
        let account = self.store.load_account(account_id)?;
        Ok(account.primary().cloned())
    }

    /// All active assignments, in creation order.
    pub fn active_states(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<StateAssignment>, MembershipError> {
        Ok(self.store.active_assignments(account_id)?)
    }

    /// The active permanent assignment, if any.
    pub fn active_permanent_state(
        &self,
        account_id: AccountId,
    ) -> Result<Option<StateAssignment>, MembershipError> {
        Ok(self
            .store
            .find_active_by_category(account_id, StateCategory::Permanent)?
            .into_iter()
            .next())
    }

    /// Active temporary assignments, in creation order.
    pub fn active_temporary_states(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<StateAssignment>, MembershipError> {
        Ok(self
            .store
            .find_active_by_category(account_id, StateCategory::Temporary)?)
    }

    /// The account's full assignment history, closed rows included.
    pub fn state_history(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<StateAssignment>, MembershipError> {
        Ok(self.store.load_account(account_id)?.into_assignments())
    }

    fn ensure_recognized(&self, definition: &StateDefinition) -> Result<(), MembershipError> {
        if self.catalog.recognizes(definition) {
            Ok(())
        } else {
            Err(MembershipError::InvalidState(definition.code.clone()))
        }
    }
}
