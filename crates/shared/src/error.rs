//! Error category taxonomy shared by all crates.
//!
//! Every domain error maps to exactly one category so calling layers can
//! render precise feedback and decide whether a retry makes sense.

use serde::{Deserialize, Serialize};

/// Coarse classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed input reaching the core (unbalanced lines, unknown account).
    /// Recoverable by the caller correcting input; never retried automatically.
    Validation,
    /// A state transition that breaks a domain rule (posting a non-draft
    /// entry, deleting a posted entry). Rejected, not retried.
    InvariantViolation,
    /// Maker-checker violation: the same identity cannot both create and
    /// post an entry. Surfaced distinctly from generic authorization.
    Authorization,
    /// A referenced entry or account does not exist.
    NotFound,
    /// A generated control/entry number collided with an existing unique
    /// value. The only category safe to retry automatically.
    Conflict,
    /// The underlying transaction could not commit. Entry state is
    /// guaranteed unchanged; propagated as-is.
    Storage,
}

impl ErrorCategory {
    /// Returns true if an operation failing with this category may be
    /// retried automatically.
    #[must_use]
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Conflict)
    }

    /// Returns the stable string code for this category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::InvariantViolation => "invariant_violation",
            Self::Authorization => "authorization",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Storage => "storage",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
