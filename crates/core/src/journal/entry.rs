//! The journal entry aggregate.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use saldo_shared::types::{
    AccountId, BranchId, JournalEntryId, JournalLineId, PartyRef, UserId,
};

use super::types::{JournalStatus, JournalType};

/// A journal entry aggregate: header plus ordered lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique entry id.
    pub id: JournalEntryId,
    /// Branch the entry belongs to.
    pub branch_id: BranchId,
    /// Human-readable entry number (JE-... or REV-...).
    pub entry_number: String,
    /// Control number (CTL-...).
    pub control_number: String,
    /// Journal book classification.
    pub journal_type: JournalType,
    /// Lifecycle status.
    pub status: JournalStatus,
    /// Calendar date of the entry.
    pub entry_date: NaiveDate,
    /// Description of the entry.
    pub description: String,
    /// Optional free-text reference.
    pub reference_no: Option<String>,
    /// Total debits, rounded to 2 decimals.
    pub total_debit: Decimal,
    /// Total credits, rounded to 2 decimals.
    pub total_credit: Decimal,
    /// The entry this one reverses, if any.
    pub reversed_from_id: Option<JournalEntryId>,
    /// The maker.
    pub created_by: UserId,
    /// The checker, set when posted.
    pub approved_by: Option<UserId>,
    /// When the entry was posted.
    pub posted_at: Option<DateTime<Utc>>,
    /// When the entry became immutable (same instant as posting).
    pub locked_at: Option<DateTime<Utc>>,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// When the entry was last updated.
    pub updated_at: DateTime<Utc>,
    /// The entry lines, in stored order.
    pub lines: Vec<JournalLine>,
}

/// A single line of a journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLine {
    /// Unique line id.
    pub id: JournalLineId,
    /// The account posted to.
    pub account_id: AccountId,
    /// Order of the line within the entry, starting at 0.
    pub line_order: i32,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Optional subsidiary-ledger party tag.
    pub party: Option<PartyRef>,
    /// Free-text particulars.
    pub particulars: Option<String>,
}

impl JournalEntry {
    /// Returns true if the entry is a reversal of another entry.
    #[must_use]
    pub fn is_reversal(&self) -> bool {
        self.reversed_from_id.is_some()
    }
}
