//! Reversal planning.
//!
//! Reversing a posted entry creates a new draft entry whose lines carry
//! the original amounts with debit and credit swapped, and moves the
//! original to the terminal REVERSED status. The new draft then goes
//! through the normal maker-checker posting flow.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use saldo_shared::types::{AccountId, JournalEntryId, PartyRef, UserId};

use crate::journal::{JournalEntry, JournalStatus};

use super::error::PostingError;

/// Prefix applied to each reversed line's particulars.
pub const REVERSAL_PARTICULARS_PREFIX: &str = "Reversal: ";
/// Prefix of the generated reversal entry description.
pub const REVERSAL_DESCRIPTION_PREFIX: &str = "Reversal entry for ";

/// A line of the reversal draft, debit and credit swapped.
#[derive(Debug, Clone)]
pub struct ReversedLine {
    /// The account posted to, unchanged from the original line.
    pub account_id: AccountId,
    /// Order of the line, preserved from the original.
    pub line_order: i32,
    /// Debit amount (the original line's credit).
    pub debit: Decimal,
    /// Credit amount (the original line's debit).
    pub credit: Decimal,
    /// Party tag, carried over so subsidiary ledgers net out.
    pub party: Option<PartyRef>,
    /// Original particulars with the reversal prefix.
    pub particulars: Option<String>,
}

/// Everything the storage layer needs to create the reversal draft and
/// flip the original entry.
#[derive(Debug, Clone)]
pub struct ReversalPlan {
    /// The entry being reversed.
    pub original_entry_id: JournalEntryId,
    /// The status the original entry moves to.
    pub original_new_status: JournalStatus,
    /// Description of the new draft.
    pub description: String,
    /// Reference back to the original entry's number.
    pub reference_no: String,
    /// Calendar date of the new draft.
    pub entry_date: NaiveDate,
    /// The maker of the new draft.
    pub created_by: UserId,
    /// The swapped lines, in original order.
    pub lines: Vec<ReversedLine>,
}

/// Builds reversal plans from posted entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReversalService;

impl ReversalService {
    /// Creates a new service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Plans the reversal of `entry`, requested by `reversed_by` at `at`.
    ///
    /// Only POSTED entries can be reversed; a second reversal of the
    /// same entry fails because the original is already REVERSED.
    pub fn reverse(
        &self,
        entry: &JournalEntry,
        reversed_by: UserId,
        at: DateTime<Utc>,
    ) -> Result<ReversalPlan, PostingError> {
        if entry.status != JournalStatus::Posted {
            return Err(PostingError::InvalidTransition {
                status: entry.status,
                action: "reverse",
            });
        }

        let lines = entry
            .lines
            .iter()
            .map(|line| ReversedLine {
                account_id: line.account_id,
                line_order: line.line_order,
                debit: line.credit,
                credit: line.debit,
                party: line.party,
                particulars: Some(format!(
                    "{REVERSAL_PARTICULARS_PREFIX}{}",
                    line.particulars.as_deref().unwrap_or_default()
                )),
            })
            .collect();

        Ok(ReversalPlan {
            original_entry_id: entry.id,
            original_new_status: JournalStatus::Reversed,
            description: format!("{REVERSAL_DESCRIPTION_PREFIX}{}", entry.entry_number),
            reference_no: entry.entry_number.clone(),
            entry_date: at.date_naive(),
            created_by: reversed_by,
            lines,
        })
    }
}
