use std::collections::HashMap;
use std::sync::RwLock;

use skyroster_core::{AccountId, ExpectedVersion, StateId};
use skyroster_membership::{
    AccountStates, AssignmentStore, StateAssignment, StateCategory, StoreError, TransitionPlan,
};

#[derive(Debug, Default)]
struct AccountRecords {
    rows: Vec<StateAssignment>,
    revision: u64,
}

/// In-memory assignment store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryAssignmentStore {
    accounts: RwLock<HashMap<AccountId, AccountRecords>>,
}

impl InMemoryAssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssignmentStore for InMemoryAssignmentStore {
    fn load_account(&self, account_id: AccountId) -> Result<AccountStates, StoreError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        Ok(match accounts.get(&account_id) {
            Some(records) => {
                AccountStates::new(account_id, records.rows.clone(), records.revision)
            }
            None => AccountStates::empty(account_id),
        })
    }

    fn find_active_by_state(
        &self,
        account_id: AccountId,
        state_id: StateId,
    ) -> Result<Option<StateAssignment>, StoreError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        Ok(accounts.get(&account_id).and_then(|records| {
            records
                .rows
                .iter()
                .find(|row| row.is_active() && row.state_id == state_id)
                .cloned()
        }))
    }

    fn find_active_by_category(
        &self,
        account_id: AccountId,
        category: StateCategory,
    ) -> Result<Vec<StateAssignment>, StoreError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        Ok(accounts
            .get(&account_id)
            .map(|records| {
                records
                    .rows
                    .iter()
                    .filter(|row| row.is_active() && row.category == category)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn active_assignments(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<StateAssignment>, StoreError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        Ok(accounts
            .get(&account_id)
            .map(|records| {
                records
                    .rows
                    .iter()
                    .filter(|row| row.is_active())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn commit(
        &self,
        account_id: AccountId,
        plan: TransitionPlan,
        expected: ExpectedVersion,
    ) -> Result<u64, StoreError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let records = accounts.entry(account_id).or_default();

        if !expected.matches(records.revision) {
            return Err(StoreError::Concurrency(format!(
                "expected {expected:?}, found {}",
                records.revision
            )));
        }

        if plan.is_empty() {
            return Ok(records.revision);
        }

        // Validate the whole plan before touching any row.
        if let Some(row) = &plan.insert {
            if row.account_id != account_id {
                return Err(StoreError::InvalidPlan(format!(
                    "insert targets account {}, commit is for account {}",
                    row.account_id, account_id
                )));
            }
            if !row.is_active() {
                return Err(StoreError::InvalidPlan(
                    "insert row is already closed".to_string(),
                ));
            }
        }
        for id in &plan.close {
            match records.rows.iter().find(|row| row.id == *id) {
                None => return Err(StoreError::UnknownAssignment(id.to_string())),
                Some(row) if !row.is_active() => {
                    return Err(StoreError::InvalidPlan(format!(
                        "assignment {id} is already closed"
                    )));
                }
                Some(_) => {}
            }
        }

        for row in records.rows.iter_mut() {
            if plan.close.contains(&row.id) {
                row.close(plan.closed_at);
            }
        }
        if let Some(row) = plan.insert {
            records.rows.push(row);
        }
        records.revision += 1;

        tracing::debug!(
            "Committed transition for account {} at revision {}",
            account_id,
            records.revision
        );
        Ok(records.revision)
    }
}
