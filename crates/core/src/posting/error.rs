//! Posting lifecycle errors.

use thiserror::Error;
use uuid::Uuid;

use saldo_shared::ErrorCategory;

use crate::journal::JournalStatus;

/// Errors from posting, reversing, or deleting journal entries.
#[derive(Debug, Error)]
pub enum PostingError {
    /// The entry is not in a status that allows the requested action.
    #[error("cannot {action} a {status} journal entry")]
    InvalidTransition {
        /// The current status of the entry.
        status: JournalStatus,
        /// The attempted action ("post", "reverse", "delete", "update").
        action: &'static str,
    },

    /// The poster is the same user who created the entry.
    #[error("Maker-checker violation: you cannot post your own journal entry.")]
    MakerCheckerViolation {
        /// The user attempting to post their own entry.
        user_id: Uuid,
    },

    /// The entry's stored totals do not balance.
    #[error("entry {entry_id} is unbalanced and cannot be posted")]
    Unbalanced {
        /// The entry id.
        entry_id: Uuid,
    },

    /// The journal entry does not exist.
    #[error("journal entry not found: {entry_id}")]
    EntryNotFound {
        /// The missing entry id.
        entry_id: Uuid,
    },

    /// Concurrent modification detected while applying the transition.
    #[error("journal entry {entry_id} was modified concurrently")]
    ConcurrentModification {
        /// The contended entry id.
        entry_id: Uuid,
    },

    /// Underlying storage failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl PostingError {
    /// Returns the error category for API mapping and retry decisions.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTransition { .. } | Self::Unbalanced { .. } => {
                ErrorCategory::InvariantViolation
            }
            Self::MakerCheckerViolation { .. } => ErrorCategory::Authorization,
            Self::EntryNotFound { .. } => ErrorCategory::NotFound,
            Self::ConcurrentModification { .. } => ErrorCategory::Conflict,
            Self::Storage(_) => ErrorCategory::Storage,
        }
    }

    /// Returns a stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "POSTING_INVALID_TRANSITION",
            Self::MakerCheckerViolation { .. } => "POSTING_MAKER_CHECKER",
            Self::Unbalanced { .. } => "POSTING_UNBALANCED",
            Self::EntryNotFound { .. } => "POSTING_ENTRY_NOT_FOUND",
            Self::ConcurrentModification { .. } => "POSTING_CONCURRENT_MODIFICATION",
            Self::Storage(_) => "POSTING_STORAGE_ERROR",
        }
    }
}
