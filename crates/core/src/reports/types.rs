//! Report data structures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use saldo_shared::types::AccountId;

use crate::journal::AccountType;

/// One account's ledger activity aggregated over a period: the sum of
/// its debits and the sum of its credits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountActivity {
    /// The account id.
    pub account_id: AccountId,
    /// The account code.
    pub code: String,
    /// The account name.
    pub name: String,
    /// The account type.
    pub account_type: AccountType,
    /// Sum of debit amounts over the period.
    pub debit_total: Decimal,
    /// Sum of credit amounts over the period.
    pub credit_total: Decimal,
}

impl AccountActivity {
    /// Net movement in the debit-positive convention.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.debit_total - self.credit_total
    }
}

/// One row of a trial balance: an account's gross debit and credit
/// sums over the report period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// The account id.
    pub account_id: AccountId,
    /// The account code.
    pub code: String,
    /// The account name.
    pub name: String,
    /// The account type.
    pub account_type: AccountType,
    /// Sum of the account's debits.
    pub debit: Decimal,
    /// Sum of the account's credits.
    pub credit: Decimal,
}

/// A trial balance: every active account's gross ledger activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalance {
    /// Rows ordered by account code.
    pub rows: Vec<TrialBalanceRow>,
    /// Sum of the debit column.
    pub total_debit: Decimal,
    /// Sum of the credit column.
    pub total_credit: Decimal,
    /// Whether the two columns agree.
    pub is_balanced: bool,
}

/// One row of a report section, in the account's natural sign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    /// The account id.
    pub account_id: AccountId,
    /// The account code.
    pub code: String,
    /// The account name.
    pub name: String,
    /// Natural-sign amount for this account.
    pub amount: Decimal,
}

/// A titled section of a financial statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    /// Rows ordered by account code.
    pub rows: Vec<ReportRow>,
    /// Section total.
    pub total: Decimal,
}

impl ReportSection {
    /// An empty section.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total: Decimal::ZERO,
        }
    }
}

/// A balance sheet as of a date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// Asset accounts.
    pub assets: ReportSection,
    /// Liability accounts.
    pub liabilities: ReportSection,
    /// Equity accounts, excluding current-period earnings.
    pub equity: ReportSection,
    /// Net income to date, folded into the equity side.
    pub net_income: Decimal,
    /// Whether assets equal liabilities plus equity plus net income.
    pub is_balanced: bool,
}

/// An income statement over a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Revenue accounts.
    pub revenue: ReportSection,
    /// Expense accounts.
    pub expenses: ReportSection,
    /// Revenue total minus expense total.
    pub net_income: Decimal,
}
