//! Append-only ledger projection.
//!
//! When an entry is posted, each of its lines is projected into one
//! ledger row carrying a per-account running balance. Rows are never
//! updated or deleted; reversals append offsetting rows.

mod balance;
mod projection;

pub use balance::{RunningBalance, next_balance, signed_for_display};
pub use projection::{LedgerProjector, ProjectedRow, SourceLine};

#[cfg(test)]
mod balance_props;
