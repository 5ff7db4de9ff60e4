//! Pure mutation planning.
//!
//! Planners read an account snapshot and produce the write set a mutation
//! commits, without touching any port. Keeping them pure keeps every
//! duplicate, supersession and validation rule unit-testable on plain data.

use chrono::{DateTime, Utc};

use skyroster_core::{AssignmentId, Entity};

use crate::assignment::{AccountStates, StateAssignment};
use crate::error::MembershipError;
use crate::state::{StateCategory, StateDefinition};

/// Write set of one planned `add_state` mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddStatePlan {
    /// The row the mutation creates.
    pub assignment: StateAssignment,
    /// Active rows the new assignment retires in the same commit.
    pub supersede: Vec<AssignmentId>,
}

/// Plan assigning `definition` to the account.
///
/// Fails with [`MembershipError::DuplicateState`] when the account already
/// actively holds the state, and with [`MembershipError::Validation`] when a
/// permanent assignment arrives without its region and division codes.
/// Region and division are membership data and only make sense on permanent
/// assignments; for temporary ones they are dropped.
pub fn plan_add_state(
    account: &AccountStates,
    definition: &StateDefinition,
    region: Option<&str>,
    division: Option<&str>,
    now: DateTime<Utc>,
) -> Result<AddStatePlan, MembershipError> {
    if account.active_by_state(definition.id).is_some() {
        return Err(MembershipError::DuplicateState(definition.code.clone()));
    }

    let (region, division) = match definition.category {
        StateCategory::Permanent => (
            Some(required_code(region, "region")?),
            Some(required_code(division, "division")?),
        ),
        StateCategory::Temporary => (None, None),
    };

    let mut supersede: Vec<AssignmentId> = Vec::new();
    if definition.is_permanent() {
        supersede.extend(
            account
                .active_in_category(StateCategory::Permanent)
                .map(|row| *row.id()),
        );
    }
    if definition.clears_temporaries {
        supersede.extend(
            account
                .active_in_category(StateCategory::Temporary)
                .map(|row| *row.id()),
        );
    }

    let assignment = StateAssignment {
        id: AssignmentId::new(),
        account_id: account.account_id(),
        state_id: definition.id,
        category: definition.category,
        region,
        division,
        start_at: now,
        end_at: None,
    };

    Ok(AddStatePlan {
        assignment,
        supersede,
    })
}

/// Plan removing `definition` from the account: the active row to close, or
/// `None` when the account does not hold the state (removal is idempotent
/// and plans nothing in that case).
pub fn plan_remove_state<'a>(
    account: &'a AccountStates,
    definition: &StateDefinition,
) -> Option<&'a StateAssignment> {
    account.active_by_state(definition.id)
}

fn required_code(value: Option<&str>, field: &str) -> Result<String, MembershipError> {
    match value {
        Some(code) if !code.trim().is_empty() => Ok(code.to_string()),
        _ => Err(MembershipError::validation(format!(
            "permanent state requires a {field} code"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use skyroster_core::AccountId;

    fn test_account_id() -> AccountId {
        AccountId::new()
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 14, hour, 0, 0).unwrap()
    }

    fn assigned(
        account_id: AccountId,
        definition: &StateDefinition,
        start_at: DateTime<Utc>,
    ) -> StateAssignment {
        StateAssignment {
            id: AssignmentId::new(),
            account_id,
            state_id: definition.id,
            category: definition.category,
            region: definition.is_permanent().then(|| "EUR".to_string()),
            division: definition.is_permanent().then(|| "GBR".to_string()),
            start_at,
            end_at: None,
        }
    }

    fn account_with(account_id: AccountId, rows: Vec<StateAssignment>) -> AccountStates {
        let revision = rows.len() as u64;
        AccountStates::new(account_id, rows, revision)
    }

    #[test]
    fn assigns_permanent_state_with_membership_codes() {
        let account = AccountStates::empty(test_account_id());
        let division = StateDefinition::permanent("DIVISION", "Division Member");

        let plan =
            plan_add_state(&account, &division, Some("EUR"), Some("GBR"), at(9)).unwrap();

        assert!(plan.supersede.is_empty());
        assert_eq!(plan.assignment.account_id, account.account_id());
        assert_eq!(plan.assignment.state_id, division.id);
        assert_eq!(plan.assignment.category, StateCategory::Permanent);
        assert_eq!(plan.assignment.region.as_deref(), Some("EUR"));
        assert_eq!(plan.assignment.division.as_deref(), Some("GBR"));
        assert_eq!(plan.assignment.start_at, at(9));
        assert!(plan.assignment.is_active());
    }

    #[test]
    fn permanent_state_requires_region_and_division() {
        let account = AccountStates::empty(test_account_id());
        let division = StateDefinition::permanent("DIVISION", "Division Member");

        let missing_region = plan_add_state(&account, &division, None, Some("GBR"), at(9));
        assert!(matches!(
            missing_region,
            Err(MembershipError::Validation(_))
        ));

        let blank_division = plan_add_state(&account, &division, Some("EUR"), Some("  "), at(9));
        assert!(matches!(
            blank_division,
            Err(MembershipError::Validation(_))
        ));
    }

    #[test]
    fn temporary_state_drops_membership_codes() {
        let account = AccountStates::empty(test_account_id());
        let visiting = StateDefinition::temporary("VISITING", "Visiting Member");

        let plan =
            plan_add_state(&account, &visiting, Some("EUR"), Some("GBR"), at(9)).unwrap();

        assert_eq!(plan.assignment.region, None);
        assert_eq!(plan.assignment.division, None);
        assert!(plan.supersede.is_empty());
    }

    #[test]
    fn rejects_duplicate_active_state() {
        let account_id = test_account_id();
        let visiting = StateDefinition::temporary("VISITING", "Visiting Member");
        let account = account_with(account_id, vec![assigned(account_id, &visiting, at(8))]);

        let err = plan_add_state(&account, &visiting, None, None, at(9)).unwrap_err();

        assert!(matches!(err, MembershipError::DuplicateState(code) if code == "VISITING"));
    }

    #[test]
    fn allows_reassigning_a_previously_closed_state() {
        let account_id = test_account_id();
        let visiting = StateDefinition::temporary("VISITING", "Visiting Member");
        let mut earlier = assigned(account_id, &visiting, at(8));
        earlier.close(at(9));
        let account = account_with(account_id, vec![earlier]);

        let plan = plan_add_state(&account, &visiting, None, None, at(10)).unwrap();

        assert!(plan.supersede.is_empty());
        assert_eq!(plan.assignment.state_id, visiting.id);
    }

    #[test]
    fn new_permanent_supersedes_the_active_permanent() {
        let account_id = test_account_id();
        let region = StateDefinition::permanent("REGION", "Region Member");
        let division = StateDefinition::permanent("DIVISION", "Division Member");
        let visiting = StateDefinition::temporary("VISITING", "Visiting Member");
        let held_region = assigned(account_id, &region, at(8));
        let held_visiting = assigned(account_id, &visiting, at(8));
        let account = account_with(
            account_id,
            vec![held_region.clone(), held_visiting.clone()],
        );

        let plan =
            plan_add_state(&account, &division, Some("EUR"), Some("GBR"), at(10)).unwrap();

        assert_eq!(plan.supersede, vec![held_region.id]);
    }

    #[test]
    fn clearing_state_sweeps_active_temporaries() {
        let account_id = test_account_id();
        let region = StateDefinition::permanent("REGION", "Region Member");
        let visiting = StateDefinition::temporary("VISITING", "Visiting Member");
        let transferring = StateDefinition::temporary("TRANSFERRING", "Transferring Member");
        let division = StateDefinition::permanent("DIVISION", "Division Member")
            .with_clears_temporaries(true);

        let held_region = assigned(account_id, &region, at(7));
        let held_visiting = assigned(account_id, &visiting, at(8));
        let held_transferring = assigned(account_id, &transferring, at(9));
        let account = account_with(
            account_id,
            vec![
                held_region.clone(),
                held_visiting.clone(),
                held_transferring.clone(),
            ],
        );

        let plan =
            plan_add_state(&account, &division, Some("EUR"), Some("GBR"), at(10)).unwrap();

        assert_eq!(
            plan.supersede,
            vec![held_region.id, held_visiting.id, held_transferring.id]
        );
    }

    #[test]
    fn non_clearing_permanent_keeps_temporaries_active() {
        let account_id = test_account_id();
        let visiting = StateDefinition::temporary("VISITING", "Visiting Member");
        let region = StateDefinition::permanent("REGION", "Region Member");
        let held_visiting = assigned(account_id, &visiting, at(8));
        let account = account_with(account_id, vec![held_visiting]);

        let plan = plan_add_state(&account, &region, Some("EUR"), Some("GBR"), at(9)).unwrap();

        assert!(plan.supersede.is_empty());
    }

    #[test]
    fn remove_plans_the_active_row() {
        let account_id = test_account_id();
        let visiting = StateDefinition::temporary("VISITING", "Visiting Member");
        let held = assigned(account_id, &visiting, at(8));
        let account = account_with(account_id, vec![held.clone()]);

        assert_eq!(plan_remove_state(&account, &visiting), Some(&held));
    }

    #[test]
    fn remove_of_unheld_state_plans_nothing() {
        let account_id = test_account_id();
        let visiting = StateDefinition::temporary("VISITING", "Visiting Member");
        let transferring = StateDefinition::temporary("TRANSFERRING", "Transferring Member");
        let account = account_with(account_id, vec![assigned(account_id, &visiting, at(8))]);

        assert_eq!(plan_remove_state(&account, &transferring), None);

        let mut closed = assigned(account_id, &visiting, at(8));
        closed.close(at(9));
        let closed_account = account_with(account_id, vec![closed]);
        assert_eq!(plan_remove_state(&closed_account, &visiting), None);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: applying any sequence of planned adds leaves at most
            /// one active permanent assignment, and every plan only ever
            /// closes rows that were active when it was made.
            #[test]
            fn add_sequences_keep_a_single_active_permanent(
                choices in prop::collection::vec((any::<bool>(), any::<bool>()), 1..12)
            ) {
                let account_id = test_account_id();
                let mut rows: Vec<StateAssignment> = Vec::new();

                for (i, (permanent, clears)) in choices.into_iter().enumerate() {
                    let definition = if permanent {
                        StateDefinition::permanent(format!("P{i}"), "Permanent")
                            .with_clears_temporaries(clears)
                    } else {
                        StateDefinition::temporary(format!("T{i}"), "Temporary")
                            .with_clears_temporaries(clears)
                    };

                    let account =
                        AccountStates::new(account_id, rows.clone(), rows.len() as u64);
                    let now = at(10) + chrono::Duration::minutes(i as i64);
                    let plan = plan_add_state(
                        &account,
                        &definition,
                        Some("EUR"),
                        Some("GBR"),
                        now,
                    )
                    .unwrap();

                    for id in &plan.supersede {
                        let target = rows.iter().find(|row| row.id == *id);
                        prop_assert!(target.is_some_and(|row| row.is_active()));
                    }

                    for row in rows.iter_mut() {
                        if plan.supersede.contains(&row.id) {
                            row.close(now);
                        }
                    }
                    rows.push(plan.assignment);
                }

                let active_permanents = rows
                    .iter()
                    .filter(|row| row.is_active() && row.category == StateCategory::Permanent)
                    .count();
                prop_assert!(active_permanents <= 1);
            }

            /// Property: a non-clearing temporary add never closes anything.
            #[test]
            fn plain_temporary_adds_never_retire_rows(
                held in prop::collection::vec(any::<bool>(), 0..8)
            ) {
                let account_id = test_account_id();
                let rows: Vec<StateAssignment> = held
                    .into_iter()
                    .enumerate()
                    .map(|(i, permanent)| {
                        let definition = if permanent {
                            StateDefinition::permanent(format!("P{i}"), "Permanent")
                        } else {
                            StateDefinition::temporary(format!("T{i}"), "Temporary")
                        };
                        assigned(account_id, &definition, at(8))
                    })
                    .collect();
                let account = AccountStates::new(account_id, rows.clone(), rows.len() as u64);

                let visiting = StateDefinition::temporary("VISITING", "Visiting Member");
                let plan = plan_add_state(&account, &visiting, None, None, at(9)).unwrap();

                prop_assert!(plan.supersede.is_empty());
                prop_assert_eq!(plan.assignment.state_id, visiting.id);
            }
        }
    }
}
