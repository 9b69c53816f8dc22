//! Reporting over ledger balances.
//!
//! Pure computation: the storage layer aggregates per-account debit and
//! credit sums and hands them here; everything downstream (columns,
//! sectioning, net income) is arithmetic over those inputs.

mod error;
mod service;
mod types;

pub use error::ReportError;
pub use service::ReportService;
pub use types::{
    AccountActivity, BalanceSheet, IncomeStatement, ReportRow, ReportSection, TrialBalance,
    TrialBalanceRow,
};
