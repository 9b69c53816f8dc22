//! Posting repository: the draft → posted → reversed transitions.
//!
//! Posting and reversal each run in a single database transaction. The
//! entry header is locked first, then the touched account records in
//! ascending account id order, so concurrent postings acquire locks in
//! the same order and cannot deadlock.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use saldo_core::journal::{
    CONTROL_PREFIX, ControlNumberGenerator, JournalEntry, JournalStatus, REVERSAL_PREFIX,
};
use saldo_core::ledger::{LedgerProjector, SourceLine};
use saldo_core::posting::{PostingService, ReversalService};
use saldo_shared::config::PostingConfig;
use saldo_shared::types::{AccountId, PartyRef, UserId};

use crate::entities::{accounts, journal_entries, journal_entry_lines, ledgers};
use crate::events::{JournalEntryPosted, PostingListener, dispatch};

use super::journal_entry::{
    JournalEntryError, is_unique_violation, load_entry_locked, map_entry,
};

/// Posting repository for lifecycle transitions and ledger projection.
#[derive(Clone)]
pub struct PostingRepository {
    db: DatabaseConnection,
    posting: PostingService,
    reversal: ReversalService,
    projector: LedgerProjector,
    generator: ControlNumberGenerator,
    listeners: Vec<Arc<dyn PostingListener>>,
    number_retries: u32,
}

impl PostingRepository {
    /// Creates a new posting repository with no listeners.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            posting: PostingService,
            reversal: ReversalService,
            projector: LedgerProjector,
            generator: ControlNumberGenerator,
            listeners: Vec::new(),
            number_retries: 3,
        }
    }

    /// Registers a post-commit listener.
    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn PostingListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Overrides the number-collision retry budget.
    #[must_use]
    pub fn with_number_retries(mut self, retries: u32) -> Self {
        self.number_retries = retries;
        self
    }

    /// Applies the posting configuration.
    #[must_use]
    pub fn with_config(self, config: &PostingConfig) -> Self {
        self.with_number_retries(config.control_number_retries)
    }

    /// The configured number-collision retry budget.
    #[must_use]
    pub fn number_retries(&self) -> u32 {
        self.number_retries
    }

    /// Posts a draft entry: validates the transition, projects the lines
    /// into the ledger with running balances, and flips the status. The
    /// whole operation commits atomically; listeners run afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is missing, not a draft, posted by
    /// its maker, unbalanced, or a database operation fails.
    pub async fn post(
        &self,
        entry_id: Uuid,
        posted_by: Uuid,
    ) -> Result<JournalEntry, JournalEntryError> {
        let txn = self.db.begin().await?;
        let entry = load_entry_locked(&txn, entry_id).await?;

        let now = Utc::now();
        let action = self
            .posting
            .post(&entry, UserId::from_uuid(posted_by), now)?;

        let prior = self.lock_account_balances(&txn, &entry).await?;
        let source: Vec<SourceLine> = entry
            .lines
            .iter()
            .map(|line| SourceLine {
                line_id: line.id,
                account_id: line.account_id,
                debit: line.debit,
                credit: line.credit,
                party: line.party,
                particulars: line.particulars.clone(),
            })
            .collect();
        let rows = self
            .projector
            .project(entry.id, entry.entry_date, source, &prior);

        for row in rows {
            let (customer_id, supplier_id) = PartyRef::into_columns(row.party);
            let model = ledgers::ActiveModel {
                journal_entry_id: Set(row.journal_entry_id.into_inner()),
                journal_line_id: Set(row.journal_line_id.into_inner()),
                account_id: Set(row.account_id.into_inner()),
                branch_id: Set(entry.branch_id.into_inner()),
                control_number: Set(entry.control_number.clone()),
                entry_date: Set(row.entry_date),
                debit: Set(row.debit),
                credit: Set(row.credit),
                running_balance: Set(row.running_balance),
                customer_id: Set(customer_id),
                supplier_id: Set(supplier_id),
                particulars: Set(row.particulars),
                posted_at: Set(now),
                created_at: Set(now),
                ..Default::default()
            };
            model.insert(&txn).await?;
        }

        let header = journal_entries::Entity::find_by_id(entry_id)
            .one(&txn)
            .await?
            .ok_or(JournalEntryError::NotFound(entry_id))?;
        let mut active: journal_entries::ActiveModel = header.into();
        active.status = Set(action.new_status.as_str().to_string());
        active.approved_by = Set(Some(posted_by));
        active.posted_at = Set(Some(action.posted_at));
        active.locked_at = Set(Some(action.posted_at));
        active.updated_at = Set(now);
        active.update(&txn).await?;

        txn.commit().await?;

        let posted = load_entry(&self.db, entry_id).await?;
        tracing::info!(
            entry_id = %entry_id,
            entry_number = %posted.entry_number,
            posted_by = %posted_by,
            "posted journal entry to ledger"
        );

        let event = JournalEntryPosted {
            entry_id,
            branch_id: posted.branch_id.into_inner(),
            entry_number: posted.entry_number.clone(),
            posted_by,
            posted_at: action.posted_at,
            total_debit: posted.total_debit,
        };
        dispatch(&self.listeners, &event).await;

        Ok(posted)
    }

    /// Reverses a posted entry: creates a new draft with debit and
    /// credit swapped on every line and moves the original to REVERSED,
    /// atomically. The draft then goes through the normal maker-checker
    /// posting flow.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is missing, not posted, the number
    /// retry budget runs out, or a database operation fails.
    pub async fn reverse(
        &self,
        entry_id: Uuid,
        reversed_by: Uuid,
    ) -> Result<JournalEntry, JournalEntryError> {
        for _attempt in 0..=self.number_retries {
            let txn = self.db.begin().await?;
            let entry = load_entry_locked(&txn, entry_id).await?;

            let now = Utc::now();
            let plan = self
                .reversal
                .reverse(&entry, UserId::from_uuid(reversed_by), now)?;

            let entry_number = self.generator.generate(REVERSAL_PREFIX);
            let control_number = self.generator.generate(CONTROL_PREFIX);
            let draft_id = Uuid::now_v7();

            let header = journal_entries::ActiveModel {
                id: Set(draft_id),
                branch_id: Set(entry.branch_id.into_inner()),
                entry_number: Set(entry_number.clone()),
                control_number: Set(control_number),
                journal_type: Set(entry.journal_type.as_str().to_string()),
                status: Set(JournalStatus::Draft.as_str().to_string()),
                entry_date: Set(plan.entry_date),
                description: Set(plan.description.clone()),
                reference_no: Set(Some(plan.reference_no.clone())),
                total_debit: Set(entry.total_credit),
                total_credit: Set(entry.total_debit),
                reversed_from_id: Set(Some(entry_id)),
                created_by: Set(reversed_by),
                approved_by: Set(None),
                locked_at: Set(None),
                posted_at: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            };

            match header.insert(&txn).await {
                Ok(_) => {}
                Err(err) if is_unique_violation(&err) => {
                    txn.rollback().await?;
                    tracing::debug!(number = %entry_number, "reversal number collided, retrying");
                    continue;
                }
                Err(err) => return Err(err.into()),
            }

            for line in &plan.lines {
                let (customer_id, supplier_id) = PartyRef::into_columns(line.party);
                let model = journal_entry_lines::ActiveModel {
                    id: Set(Uuid::now_v7()),
                    journal_entry_id: Set(draft_id),
                    account_id: Set(line.account_id.into_inner()),
                    line_order: Set(line.line_order),
                    debit: Set(line.debit),
                    credit: Set(line.credit),
                    customer_id: Set(customer_id),
                    supplier_id: Set(supplier_id),
                    particulars: Set(line.particulars.clone()),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                model.insert(&txn).await?;
            }

            let original = journal_entries::Entity::find_by_id(entry_id)
                .one(&txn)
                .await?
                .ok_or(JournalEntryError::NotFound(entry_id))?;
            let mut active: journal_entries::ActiveModel = original.into();
            active.status = Set(plan.original_new_status.as_str().to_string());
            active.updated_at = Set(now);
            active.update(&txn).await?;

            txn.commit().await?;

            tracing::info!(
                original = %entry_id,
                reversal = %draft_id,
                "created reversal draft and closed original entry"
            );
            return load_entry(&self.db, draft_id).await;
        }

        Err(JournalEntryError::NumberExhausted(self.number_retries + 1))
    }

    /// Locks each touched account record in ascending account id order
    /// and returns the prior balances from the latest ledger rows.
    ///
    /// The account row is the lock target, not the ledger row: an
    /// account with no ledger history yet still has a row to serialize
    /// concurrent first postings on.
    async fn lock_account_balances(
        &self,
        txn: &DatabaseTransaction,
        entry: &JournalEntry,
    ) -> Result<HashMap<AccountId, Decimal>, JournalEntryError> {
        let mut account_ids: Vec<AccountId> =
            entry.lines.iter().map(|line| line.account_id).collect();
        account_ids.sort_by_key(|id| id.into_inner());
        account_ids.dedup();

        let mut prior = HashMap::new();
        for account_id in account_ids {
            accounts::Entity::find_by_id(account_id.into_inner())
                .lock_exclusive()
                .one(txn)
                .await?
                .ok_or_else(|| {
                    JournalEntryError::Corrupt(format!(
                        "line references missing account {account_id}"
                    ))
                })?;

            let latest = ledgers::Entity::find()
                .filter(ledgers::Column::AccountId.eq(account_id.into_inner()))
                .order_by_desc(ledgers::Column::Id)
                .limit(1)
                .one(txn)
                .await?;
            if let Some(row) = latest {
                prior.insert(account_id, row.running_balance);
            }
        }

        Ok(prior)
    }
}

/// Loads the aggregate outside any transaction.
async fn load_entry(
    db: &DatabaseConnection,
    entry_id: Uuid,
) -> Result<JournalEntry, JournalEntryError> {
    let header = journal_entries::Entity::find_by_id(entry_id)
        .one(db)
        .await?
        .ok_or(JournalEntryError::NotFound(entry_id))?;

    let lines = journal_entry_lines::Entity::find()
        .filter(journal_entry_lines::Column::JournalEntryId.eq(entry_id))
        .order_by_asc(journal_entry_lines::Column::LineOrder)
        .all(db)
        .await?;

    map_entry(header, lines)
}
