//! Journal entry errors.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use saldo_shared::ErrorCategory;

/// Errors that can occur when creating or modifying journal entries.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Entry has fewer than the minimum number of lines.
    #[error("journal entry must have at least 2 lines, got {count}")]
    InsufficientLines {
        /// The number of lines provided.
        count: usize,
    },

    /// A line carries a negative debit or credit.
    #[error("line {line} has a negative amount: {amount}")]
    NegativeAmount {
        /// Zero-based index of the offending line.
        line: usize,
        /// The negative amount.
        amount: Decimal,
    },

    /// Total debits do not equal total credits.
    #[error("entry is unbalanced: debits {debit} != credits {credit}")]
    Unbalanced {
        /// Rounded total debits.
        debit: Decimal,
        /// Rounded total credits.
        credit: Decimal,
    },

    /// A referenced account does not exist.
    #[error("account not found: {account_id}")]
    AccountNotFound {
        /// The missing account id.
        account_id: Uuid,
    },

    /// A referenced account is inactive or deleted.
    #[error("account is inactive: {account_id}")]
    AccountInactive {
        /// The inactive account id.
        account_id: Uuid,
    },

    /// A referenced account belongs to a different branch.
    #[error("account {account_id} does not belong to branch {branch_id}")]
    BranchMismatch {
        /// The account id.
        account_id: Uuid,
        /// The branch the entry is being created in.
        branch_id: Uuid,
    },

    /// The journal entry does not exist.
    #[error("journal entry not found: {entry_id}")]
    EntryNotFound {
        /// The missing entry id.
        entry_id: Uuid,
    },

    /// The entry is not in DRAFT status and cannot be modified.
    #[error("journal entry {entry_id} is {status} and cannot be modified")]
    NotEditable {
        /// The entry id.
        entry_id: Uuid,
        /// The current status.
        status: String,
    },

    /// A generated entry or control number collided with an existing one.
    #[error("generated number collided: {number}")]
    NumberCollision {
        /// The colliding number.
        number: String,
    },

    /// Underlying storage failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl JournalError {
    /// Returns the error category for API mapping and retry decisions.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InsufficientLines { .. }
            | Self::NegativeAmount { .. }
            | Self::Unbalanced { .. }
            | Self::AccountNotFound { .. }
            | Self::AccountInactive { .. }
            | Self::BranchMismatch { .. } => ErrorCategory::Validation,
            Self::EntryNotFound { .. } => ErrorCategory::NotFound,
            Self::NotEditable { .. } => ErrorCategory::InvariantViolation,
            Self::NumberCollision { .. } => ErrorCategory::Conflict,
            Self::Storage(_) => ErrorCategory::Storage,
        }
    }

    /// Returns a stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines { .. } => "JOURNAL_INSUFFICIENT_LINES",
            Self::NegativeAmount { .. } => "JOURNAL_NEGATIVE_AMOUNT",
            Self::Unbalanced { .. } => "JOURNAL_UNBALANCED",
            Self::AccountNotFound { .. } => "JOURNAL_ACCOUNT_NOT_FOUND",
            Self::AccountInactive { .. } => "JOURNAL_ACCOUNT_INACTIVE",
            Self::BranchMismatch { .. } => "JOURNAL_BRANCH_MISMATCH",
            Self::EntryNotFound { .. } => "JOURNAL_ENTRY_NOT_FOUND",
            Self::NotEditable { .. } => "JOURNAL_NOT_EDITABLE",
            Self::NumberCollision { .. } => "JOURNAL_NUMBER_COLLISION",
            Self::Storage(_) => "JOURNAL_STORAGE_ERROR",
        }
    }
}
