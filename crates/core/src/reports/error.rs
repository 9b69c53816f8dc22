//! Report errors.

use chrono::NaiveDate;
use thiserror::Error;

use saldo_shared::ErrorCategory;

/// Errors from report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The requested period has its end before its start.
    #[error("invalid report period: {from} is after {to}")]
    InvalidPeriod {
        /// Period start.
        from: NaiveDate,
        /// Period end.
        to: NaiveDate,
    },

    /// Underlying storage failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ReportError {
    /// Returns the error category for API mapping.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPeriod { .. } => ErrorCategory::Validation,
            Self::Storage(_) => ErrorCategory::Storage,
        }
    }

    /// Returns a stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPeriod { .. } => "REPORT_INVALID_PERIOD",
            Self::Storage(_) => "REPORT_STORAGE_ERROR",
        }
    }
}
