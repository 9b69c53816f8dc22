//! Report computation over aggregated account activity.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::journal::AccountType;
use crate::ledger::signed_for_display;

use super::error::ReportError;
use super::types::{
    AccountActivity, BalanceSheet, IncomeStatement, ReportRow, ReportSection, TrialBalance,
    TrialBalanceRow,
};

/// Pure report builders. Inputs are per-account debit/credit sums over
/// the report period; accounts with no activity are dropped from every
/// report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportService;

impl ReportService {
    /// Creates a new service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validates that a report period is well-formed.
    pub fn check_period(&self, from: NaiveDate, to: NaiveDate) -> Result<(), ReportError> {
        if from > to {
            return Err(ReportError::InvalidPeriod { from, to });
        }
        Ok(())
    }

    /// Builds a trial balance: each account's gross debit and credit
    /// sums side by side. Posting keeps entries balanced, so the two
    /// column totals agree whenever the inputs cover the whole ledger.
    #[must_use]
    pub fn trial_balance(&self, mut activities: Vec<AccountActivity>) -> TrialBalance {
        activities.sort_by(|a, b| a.code.cmp(&b.code));

        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        let rows: Vec<TrialBalanceRow> = activities
            .into_iter()
            .filter(|a| !(a.debit_total.is_zero() && a.credit_total.is_zero()))
            .map(|a| {
                total_debit += a.debit_total;
                total_credit += a.credit_total;
                TrialBalanceRow {
                    account_id: a.account_id,
                    code: a.code,
                    name: a.name,
                    account_type: a.account_type,
                    debit: a.debit_total,
                    credit: a.credit_total,
                }
            })
            .collect();

        TrialBalance {
            rows,
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Sums the debit-positive net movement, Σdebit − Σcredit, of all
    /// accounts of one type. Credit-heavy types come out negative here;
    /// the statement builders flip signs for presentation.
    #[must_use]
    pub fn net_by_type(&self, activities: &[AccountActivity], account_type: AccountType) -> Decimal {
        activities
            .iter()
            .filter(|a| a.account_type == account_type)
            .map(AccountActivity::net)
            .sum()
    }

    /// Builds a balance sheet. Net income (revenue minus expenses over
    /// the same activity) is folded into the equity side so the sheet
    /// balances without a closing entry.
    #[must_use]
    pub fn balance_sheet(&self, activities: &[AccountActivity]) -> BalanceSheet {
        let assets = self.section(activities, AccountType::Asset);
        let liabilities = self.section(activities, AccountType::Liability);
        let equity = self.section(activities, AccountType::Equity);
        // Sections are presented in natural sign, so the debit-positive
        // nets are negated: a credit-heavy revenue net is a profit.
        let net_income = -(self.net_by_type(activities, AccountType::Revenue)
            + self.net_by_type(activities, AccountType::Expense));

        let is_balanced = assets.total == liabilities.total + equity.total + net_income;

        BalanceSheet {
            assets,
            liabilities,
            equity,
            net_income,
            is_balanced,
        }
    }

    /// Builds an income statement from period activity.
    #[must_use]
    pub fn income_statement(&self, activities: &[AccountActivity]) -> IncomeStatement {
        let revenue = self.section(activities, AccountType::Revenue);
        let expenses = self.section(activities, AccountType::Expense);
        let net_income = revenue.total - expenses.total;

        IncomeStatement {
            revenue,
            expenses,
            net_income,
        }
    }

    fn section(&self, activities: &[AccountActivity], account_type: AccountType) -> ReportSection {
        let normal = account_type.normal_balance();
        let mut rows: Vec<ReportRow> = activities
            .iter()
            .filter(|a| a.account_type == account_type && !a.net().is_zero())
            .map(|a| ReportRow {
                account_id: a.account_id,
                code: a.code.clone(),
                name: a.name.clone(),
                amount: signed_for_display(normal, a.net()),
            })
            .collect();
        rows.sort_by(|a, b| a.code.cmp(&b.code));
        let total = rows.iter().map(|r| r.amount).sum();

        ReportSection { rows, total }
    }
}
