//! Pure journal validation service.
//!
//! Validates entry inputs against the chart of accounts without touching
//! storage; the caller resolves referenced accounts up front and passes
//! them in.

use std::collections::HashMap;

use uuid::Uuid;

use super::error::JournalError;
use super::types::{CreateJournalEntryInput, EntryTotals};
use super::validation::validate_lines;

/// A resolved account, as much as validation needs to know.
#[derive(Debug, Clone, Copy)]
pub struct AccountInfo {
    /// The account id.
    pub id: Uuid,
    /// The branch the account belongs to.
    pub branch_id: Uuid,
    /// Whether the account is active and not deleted.
    pub is_active: bool,
}

/// Stateless validation over journal entry inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct JournalService;

impl JournalService {
    /// Creates a new service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validates a create input against the resolved accounts.
    ///
    /// `accounts` must contain every account referenced by the input's
    /// lines; a missing key is reported as [`JournalError::AccountNotFound`].
    /// Returns the rounded totals on success.
    pub fn validate(
        &self,
        input: &CreateJournalEntryInput,
        accounts: &HashMap<Uuid, AccountInfo>,
    ) -> Result<EntryTotals, JournalError> {
        let totals = validate_lines(&input.lines)?;

        for line in &input.lines {
            let account = accounts.get(&line.account_id).ok_or(
                JournalError::AccountNotFound {
                    account_id: line.account_id,
                },
            )?;
            if !account.is_active {
                return Err(JournalError::AccountInactive {
                    account_id: account.id,
                });
            }
            if account.branch_id != input.branch_id {
                return Err(JournalError::BranchMismatch {
                    account_id: account.id,
                    branch_id: input.branch_id,
                });
            }
        }

        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::journal::types::{JournalLineInput, JournalType};

    fn input_with(lines: Vec<JournalLineInput>, branch_id: Uuid) -> CreateJournalEntryInput {
        CreateJournalEntryInput {
            branch_id,
            journal_type: JournalType::General,
            entry_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            description: "test entry".to_string(),
            reference_no: None,
            lines,
            created_by: Uuid::now_v7(),
        }
    }

    fn line(account_id: Uuid, debit: rust_decimal::Decimal, credit: rust_decimal::Decimal) -> JournalLineInput {
        JournalLineInput {
            account_id,
            debit,
            credit,
            party: None,
            particulars: None,
        }
    }

    #[test]
    fn test_validate_ok() {
        let branch = Uuid::now_v7();
        let cash = Uuid::now_v7();
        let sales = Uuid::now_v7();
        let accounts = HashMap::from([
            (cash, AccountInfo { id: cash, branch_id: branch, is_active: true }),
            (sales, AccountInfo { id: sales, branch_id: branch, is_active: true }),
        ]);
        let input = input_with(
            vec![line(cash, dec!(100), dec!(0)), line(sales, dec!(0), dec!(100))],
            branch,
        );

        let totals = JournalService::new().validate(&input, &accounts).unwrap();
        assert!(totals.is_balanced);
    }

    #[test]
    fn test_validate_missing_account() {
        let branch = Uuid::now_v7();
        let cash = Uuid::now_v7();
        let ghost = Uuid::now_v7();
        let accounts = HashMap::from([(cash, AccountInfo {
            id: cash,
            branch_id: branch,
            is_active: true,
        })]);
        let input = input_with(
            vec![line(cash, dec!(50), dec!(0)), line(ghost, dec!(0), dec!(50))],
            branch,
        );

        let err = JournalService::new().validate(&input, &accounts).unwrap_err();
        assert!(matches!(err, JournalError::AccountNotFound { account_id } if account_id == ghost));
    }

    #[test]
    fn test_validate_inactive_account() {
        let branch = Uuid::now_v7();
        let cash = Uuid::now_v7();
        let closed = Uuid::now_v7();
        let accounts = HashMap::from([
            (cash, AccountInfo { id: cash, branch_id: branch, is_active: true }),
            (closed, AccountInfo { id: closed, branch_id: branch, is_active: false }),
        ]);
        let input = input_with(
            vec![line(cash, dec!(50), dec!(0)), line(closed, dec!(0), dec!(50))],
            branch,
        );

        let err = JournalService::new().validate(&input, &accounts).unwrap_err();
        assert!(matches!(err, JournalError::AccountInactive { .. }));
    }

    #[test]
    fn test_validate_branch_mismatch() {
        let branch = Uuid::now_v7();
        let other_branch = Uuid::now_v7();
        let cash = Uuid::now_v7();
        let foreign = Uuid::now_v7();
        let accounts = HashMap::from([
            (cash, AccountInfo { id: cash, branch_id: branch, is_active: true }),
            (foreign, AccountInfo { id: foreign, branch_id: other_branch, is_active: true }),
        ]);
        let input = input_with(
            vec![line(cash, dec!(50), dec!(0)), line(foreign, dec!(0), dec!(50))],
            branch,
        );

        let err = JournalService::new().validate(&input, &accounts).unwrap_err();
        assert!(matches!(err, JournalError::BranchMismatch { .. }));
    }

    #[test]
    fn test_balance_checked_before_accounts() {
        // An unbalanced entry fails before any account lookup.
        let branch = Uuid::now_v7();
        let ghost = Uuid::now_v7();
        let input = input_with(
            vec![line(ghost, dec!(100), dec!(0)), line(ghost, dec!(0), dec!(50))],
            branch,
        );

        let err = JournalService::new()
            .validate(&input, &HashMap::new())
            .unwrap_err();
        assert!(matches!(err, JournalError::Unbalanced { .. }));
    }
}
