//! Journal entry aggregate.
//!
//! This module implements the write side of the double-entry journal:
//! - Domain types for entries and lines
//! - The balance invariant (debits == credits at 2 decimals)
//! - Input validation for entry creation
//! - Control number generation
//! - Error types for journal operations

pub mod control;
pub mod entry;
pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use control::{CONTROL_PREFIX, ControlNumberGenerator, ENTRY_PREFIX, REVERSAL_PREFIX};
pub use entry::{JournalEntry, JournalLine};
pub use error::JournalError;
pub use service::{AccountInfo, JournalService};
pub use types::{
    AccountType, CreateJournalEntryInput, EntryTotals, JournalLineInput, JournalStatus,
    JournalType, NormalBalance,
};
pub use validation::{round_amount, validate_lines};
