//! Status transition checks for the posting lifecycle.

use chrono::{DateTime, Utc};

use saldo_shared::types::{JournalEntryId, UserId};

use crate::journal::{JournalEntry, JournalStatus};

use super::error::PostingError;

/// The mutation to apply when a draft entry is posted.
#[derive(Debug, Clone, Copy)]
pub struct PostAction {
    /// The entry being posted.
    pub entry_id: JournalEntryId,
    /// The checker who approved the posting.
    pub approved_by: UserId,
    /// When the posting happened; also the instant the entry locks.
    pub posted_at: DateTime<Utc>,
    /// The status to move to (always [`JournalStatus::Posted`]).
    pub new_status: JournalStatus,
}

/// Stateless checks over the draft → posted → reversed lifecycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostingService;

impl PostingService {
    /// Creates a new service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Checks that `entry` can be posted by `acting_user` and returns
    /// the mutation to apply.
    ///
    /// Enforces, in order: the entry is a draft, the poster is not the
    /// maker, and the stored totals balance.
    pub fn post(
        &self,
        entry: &JournalEntry,
        acting_user: UserId,
        at: DateTime<Utc>,
    ) -> Result<PostAction, PostingError> {
        if entry.status != JournalStatus::Draft {
            return Err(PostingError::InvalidTransition {
                status: entry.status,
                action: "post",
            });
        }
        if entry.created_by == acting_user {
            return Err(PostingError::MakerCheckerViolation {
                user_id: acting_user.into_inner(),
            });
        }
        if entry.total_debit != entry.total_credit {
            return Err(PostingError::Unbalanced {
                entry_id: entry.id.into_inner(),
            });
        }

        Ok(PostAction {
            entry_id: entry.id,
            approved_by: acting_user,
            posted_at: at,
            new_status: JournalStatus::Posted,
        })
    }

    /// Checks that `entry` can be deleted. Only drafts can.
    pub fn can_delete(&self, entry: &JournalEntry) -> Result<(), PostingError> {
        if entry.status != JournalStatus::Draft {
            return Err(PostingError::InvalidTransition {
                status: entry.status,
                action: "delete",
            });
        }
        Ok(())
    }

    /// Checks that `entry` can be updated in place. Only drafts can.
    pub fn can_update(&self, entry: &JournalEntry) -> Result<(), PostingError> {
        if entry.status != JournalStatus::Draft {
            return Err(PostingError::InvalidTransition {
                status: entry.status,
                action: "update",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::journal::JournalType;
    use saldo_shared::types::BranchId;

    fn entry(status: JournalStatus, created_by: UserId) -> JournalEntry {
        let now = Utc::now();
        JournalEntry {
            id: JournalEntryId::new(),
            branch_id: BranchId::new(),
            entry_number: "JE-20260115093045-0042".to_string(),
            control_number: "CTL-20260115093045-0117".to_string(),
            journal_type: JournalType::General,
            status,
            entry_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            description: "test".to_string(),
            reference_no: None,
            total_debit: dec!(100.00),
            total_credit: dec!(100.00),
            reversed_from_id: None,
            created_by,
            approved_by: None,
            posted_at: None,
            locked_at: None,
            created_at: now,
            updated_at: now,
            lines: Vec::new(),
        }
    }

    #[test]
    fn test_post_draft_by_other_user() {
        let maker = UserId::new();
        let checker = UserId::new();
        let entry = entry(JournalStatus::Draft, maker);

        let action = PostingService::new()
            .post(&entry, checker, Utc::now())
            .unwrap();
        assert_eq!(action.new_status, JournalStatus::Posted);
        assert_eq!(action.approved_by, checker);
    }

    #[test]
    fn test_post_own_entry_rejected() {
        let maker = UserId::new();
        let entry = entry(JournalStatus::Draft, maker);

        let err = PostingService::new()
            .post(&entry, maker, Utc::now())
            .unwrap_err();
        assert!(matches!(err, PostingError::MakerCheckerViolation { .. }));
    }

    #[test]
    fn test_post_already_posted_rejected() {
        let entry = entry(JournalStatus::Posted, UserId::new());
        let err = PostingService::new()
            .post(&entry, UserId::new(), Utc::now())
            .unwrap_err();
        assert!(matches!(
            err,
            PostingError::InvalidTransition {
                status: JournalStatus::Posted,
                action: "post",
            }
        ));
    }

    #[test]
    fn test_post_reversed_rejected() {
        let entry = entry(JournalStatus::Reversed, UserId::new());
        let err = PostingService::new()
            .post(&entry, UserId::new(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, PostingError::InvalidTransition { .. }));
    }

    #[test]
    fn test_post_unbalanced_rejected() {
        let mut entry = entry(JournalStatus::Draft, UserId::new());
        entry.total_credit = dec!(99.00);
        let err = PostingService::new()
            .post(&entry, UserId::new(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, PostingError::Unbalanced { .. }));
    }

    #[test]
    fn test_status_check_before_maker_checker() {
        // A maker trying to re-post their already-posted entry gets the
        // transition error, not the maker-checker error.
        let maker = UserId::new();
        let entry = entry(JournalStatus::Posted, maker);
        let err = PostingService::new()
            .post(&entry, maker, Utc::now())
            .unwrap_err();
        assert!(matches!(err, PostingError::InvalidTransition { .. }));
    }

    #[test]
    fn test_can_delete_draft_only() {
        let service = PostingService::new();
        assert!(service
            .can_delete(&entry(JournalStatus::Draft, UserId::new()))
            .is_ok());
        assert!(service
            .can_delete(&entry(JournalStatus::Posted, UserId::new()))
            .is_err());
        assert!(service
            .can_delete(&entry(JournalStatus::Reversed, UserId::new()))
            .is_err());
    }

    #[test]
    fn test_can_update_draft_only() {
        let service = PostingService::new();
        assert!(service
            .can_update(&entry(JournalStatus::Draft, UserId::new()))
            .is_ok());
        assert!(service
            .can_update(&entry(JournalStatus::Posted, UserId::new()))
            .is_err());
    }
}
