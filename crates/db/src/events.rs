//! Post-commit domain events.
//!
//! Listeners run after the posting transaction has committed, so a
//! failing listener can never roll back the ledger. Listener errors are
//! logged and swallowed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::json;
use uuid::Uuid;

use crate::entities::audit_logs;

/// Emitted once a journal entry has been posted and its ledger rows
/// committed.
#[derive(Debug, Clone)]
pub struct JournalEntryPosted {
    /// The posted entry.
    pub entry_id: Uuid,
    /// The branch the entry belongs to.
    pub branch_id: Uuid,
    /// The entry number.
    pub entry_number: String,
    /// The checker who posted it.
    pub posted_by: Uuid,
    /// When it was posted.
    pub posted_at: DateTime<Utc>,
    /// The entry's total (debits == credits).
    pub total_debit: Decimal,
}

/// A post-commit hook for posted entries.
#[async_trait::async_trait]
pub trait PostingListener: Send + Sync {
    /// Handles a posted-entry event. Must not assume it runs inside the
    /// posting transaction.
    async fn handle(&self, event: &JournalEntryPosted);
}

/// Dispatches an event to every listener in order.
pub async fn dispatch(listeners: &[Arc<dyn PostingListener>], event: &JournalEntryPosted) {
    for listener in listeners {
        listener.handle(event).await;
    }
}

/// Writes one audit log row per posted entry.
#[derive(Clone)]
pub struct AuditLogListener {
    db: DatabaseConnection,
}

impl AuditLogListener {
    /// Creates a new audit log listener.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl PostingListener for AuditLogListener {
    async fn handle(&self, event: &JournalEntryPosted) {
        let log = audit_logs::ActiveModel {
            branch_id: Set(event.branch_id),
            user_id: Set(event.posted_by),
            action: Set("journal_entry.posted".to_string()),
            entity_type: Set("journal_entry".to_string()),
            entity_id: Set(event.entry_id.to_string()),
            details: Set(Some(json!({
                "entry_number": event.entry_number,
                "total": event.total_debit,
            }))),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        if let Err(err) = log.insert(&self.db).await {
            tracing::warn!(
                entry_id = %event.entry_id,
                error = %err,
                "failed to write audit log for posted entry"
            );
        }
    }
}
