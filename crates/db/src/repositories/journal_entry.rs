//! Journal entry repository: draft CRUD and number generation.

use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use saldo_core::journal::{
    CONTROL_PREFIX, ControlNumberGenerator, CreateJournalEntryInput, ENTRY_PREFIX, JournalEntry,
    JournalError, JournalLine, JournalLineInput, JournalService, JournalStatus, JournalType,
};
use saldo_core::posting::{PostingError, PostingService};
use saldo_shared::config::PostingConfig;
use saldo_shared::types::{
    BranchId, JournalEntryId, JournalLineId, PageRequest, PageResponse, PartyRef, UserId,
};

use crate::entities::{accounts, journal_entries, journal_entry_lines};

/// Error types for journal entry operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalEntryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] JournalError),

    /// Lifecycle rule rejected the operation.
    #[error(transparent)]
    Lifecycle(#[from] PostingError),

    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    NotFound(Uuid),

    /// Number generation kept colliding.
    #[error("Could not generate a unique entry number after {0} attempts")]
    NumberExhausted(u32),

    /// A stored row holds a value the domain cannot parse.
    #[error("Corrupt journal row: {0}")]
    Corrupt(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filter options for listing journal entries.
#[derive(Debug, Clone, Default)]
pub struct JournalEntryFilter {
    /// Filter by status.
    pub status: Option<JournalStatus>,
    /// Filter by journal type.
    pub journal_type: Option<JournalType>,
    /// Filter by entry date range start.
    pub date_from: Option<NaiveDate>,
    /// Filter by entry date range end.
    pub date_to: Option<NaiveDate>,
}

/// Input for updating a draft entry.
#[derive(Debug, Clone, Default)]
pub struct UpdateDraftInput {
    /// New description, if changing.
    pub description: Option<String>,
    /// New reference, if changing (`Some(None)` clears it).
    pub reference_no: Option<Option<String>>,
    /// New entry date, if changing.
    pub entry_date: Option<NaiveDate>,
    /// Replacement lines, if changing. Replaces the whole set.
    pub lines: Option<Vec<JournalLineInput>>,
}

/// Journal entry repository for draft CRUD.
#[derive(Debug, Clone)]
pub struct JournalEntryRepository {
    db: DatabaseConnection,
    service: JournalService,
    posting: PostingService,
    generator: ControlNumberGenerator,
    number_retries: u32,
}

impl JournalEntryRepository {
    /// Creates a new journal entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            service: JournalService,
            posting: PostingService,
            generator: ControlNumberGenerator,
            number_retries: 3,
        }
    }

    /// Overrides the number-collision retry budget.
    #[must_use]
    pub const fn with_number_retries(mut self, retries: u32) -> Self {
        self.number_retries = retries;
        self
    }

    /// Applies the posting configuration.
    #[must_use]
    pub const fn with_config(self, config: &PostingConfig) -> Self {
        self.with_number_retries(config.control_number_retries)
    }

    /// The configured number-collision retry budget.
    #[must_use]
    pub const fn number_retries(&self) -> u32 {
        self.number_retries
    }

    /// Creates a draft journal entry.
    ///
    /// Validates the lines and referenced accounts, generates entry and
    /// control numbers, and retries with fresh numbers when the unique
    /// constraint trips.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the retry budget runs out,
    /// or a database operation fails.
    pub async fn create(
        &self,
        input: CreateJournalEntryInput,
    ) -> Result<JournalEntry, JournalEntryError> {
        let accounts = self.resolve_accounts(&input).await?;
        let totals = self.service.validate(&input, &accounts)?;

        for _attempt in 0..=self.number_retries {
            let entry_number = self.generator.generate(ENTRY_PREFIX);
            let control_number = self.generator.generate(CONTROL_PREFIX);

            let txn = self.db.begin().await?;
            let now = Utc::now();
            let entry_id = Uuid::now_v7();

            let header = journal_entries::ActiveModel {
                id: Set(entry_id),
                branch_id: Set(input.branch_id),
                entry_number: Set(entry_number.clone()),
                control_number: Set(control_number),
                journal_type: Set(input.journal_type.as_str().to_string()),
                status: Set(JournalStatus::Draft.as_str().to_string()),
                entry_date: Set(input.entry_date),
                description: Set(input.description.clone()),
                reference_no: Set(input.reference_no.clone()),
                total_debit: Set(totals.total_debit),
                total_credit: Set(totals.total_credit),
                reversed_from_id: Set(None),
                created_by: Set(input.created_by),
                approved_by: Set(None),
                posted_at: Set(None),
                locked_at: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            };

            let header = match header.insert(&txn).await {
                Ok(model) => model,
                Err(err) if is_unique_violation(&err) => {
                    txn.rollback().await?;
                    tracing::debug!(number = %entry_number, "entry number collided, retrying");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            let lines = insert_lines(&txn, entry_id, &input.lines).await?;
            txn.commit().await?;

            tracing::info!(entry_id = %entry_id, entry_number = %header.entry_number, "created draft journal entry");
            return map_entry(header, lines);
        }

        Err(JournalEntryError::NumberExhausted(self.number_retries + 1))
    }

    /// Finds an entry with its lines in stored order.
    pub async fn find(&self, id: Uuid) -> Result<JournalEntry, JournalEntryError> {
        let header = journal_entries::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(JournalEntryError::NotFound(id))?;

        let lines = journal_entry_lines::Entity::find()
            .filter(journal_entry_lines::Column::JournalEntryId.eq(id))
            .order_by_asc(journal_entry_lines::Column::LineOrder)
            .all(&self.db)
            .await?;

        map_entry(header, lines)
    }

    /// Lists entry headers for a branch, newest first. Lines are not
    /// loaded; use [`find`](Self::find) for the full aggregate.
    pub async fn list(
        &self,
        branch_id: Uuid,
        filter: &JournalEntryFilter,
        page: PageRequest,
    ) -> Result<PageResponse<JournalEntry>, JournalEntryError> {
        let mut query = journal_entries::Entity::find()
            .filter(journal_entries::Column::BranchId.eq(branch_id));

        if let Some(status) = filter.status {
            query = query.filter(journal_entries::Column::Status.eq(status.as_str()));
        }
        if let Some(journal_type) = filter.journal_type {
            query = query.filter(journal_entries::Column::JournalType.eq(journal_type.as_str()));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(journal_entries::Column::EntryDate.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(journal_entries::Column::EntryDate.lte(to));
        }

        let paginator = query
            .order_by_desc(journal_entries::Column::EntryDate)
            .order_by_desc(journal_entries::Column::CreatedAt)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let headers = paginator.fetch_page(page.zero_indexed_page()).await?;

        let data = headers
            .into_iter()
            .map(|header| map_entry(header, Vec::new()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Updates a draft entry in place. Rejected for posted or reversed
    /// entries.
    pub async fn update_draft(
        &self,
        id: Uuid,
        update: UpdateDraftInput,
    ) -> Result<JournalEntry, JournalEntryError> {
        let txn = self.db.begin().await?;
        let current = load_entry_locked(&txn, id).await?;
        self.posting.can_update(&current)?;

        let now = Utc::now();

        let header = journal_entries::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(JournalEntryError::NotFound(id))?;
        let mut active: journal_entries::ActiveModel = header.into();

        if let Some(lines) = &update.lines {
            // Replacement lines go through the same validation as create.
            let probe = CreateJournalEntryInput {
                branch_id: current.branch_id.into_inner(),
                journal_type: current.journal_type,
                entry_date: update.entry_date.unwrap_or(current.entry_date),
                description: update
                    .description
                    .clone()
                    .unwrap_or_else(|| current.description.clone()),
                reference_no: current.reference_no.clone(),
                lines: lines.clone(),
                created_by: current.created_by.into_inner(),
            };
            let accounts = self.resolve_accounts(&probe).await?;
            let totals = self.service.validate(&probe, &accounts)?;

            journal_entry_lines::Entity::delete_many()
                .filter(journal_entry_lines::Column::JournalEntryId.eq(id))
                .exec(&txn)
                .await?;
            insert_lines(&txn, id, lines).await?;

            active.total_debit = Set(totals.total_debit);
            active.total_credit = Set(totals.total_credit);
        }

        if let Some(description) = update.description {
            active.description = Set(description);
        }
        if let Some(reference_no) = update.reference_no {
            active.reference_no = Set(reference_no);
        }
        if let Some(entry_date) = update.entry_date {
            active.entry_date = Set(entry_date);
        }
        active.updated_at = Set(now);

        active.update(&txn).await?;
        txn.commit().await?;

        self.find(id).await
    }

    /// Deletes a draft entry and its lines. Posted and reversed entries
    /// are immutable and cannot be deleted.
    pub async fn delete(&self, id: Uuid) -> Result<(), JournalEntryError> {
        let txn = self.db.begin().await?;
        let current = load_entry_locked(&txn, id).await?;
        self.posting.can_delete(&current)?;

        journal_entry_lines::Entity::delete_many()
            .filter(journal_entry_lines::Column::JournalEntryId.eq(id))
            .exec(&txn)
            .await?;
        journal_entries::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!(entry_id = %id, "deleted draft journal entry");
        Ok(())
    }

    /// Fetches the accounts referenced by an input's lines.
    async fn resolve_accounts(
        &self,
        input: &CreateJournalEntryInput,
    ) -> Result<HashMap<Uuid, saldo_core::journal::AccountInfo>, JournalEntryError> {
        let ids: Vec<Uuid> = input
            .lines
            .iter()
            .map(|l| l.account_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let models = accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;

        Ok(models
            .into_iter()
            .map(|m| {
                (
                    m.id,
                    saldo_core::journal::AccountInfo {
                        id: m.id,
                        branch_id: m.branch_id,
                        is_active: m.is_active && m.deleted_at.is_none(),
                    },
                )
            })
            .collect())
    }
}

/// Loads the aggregate inside a transaction, locking the header row.
/// Mutating operations go through this so the status they check cannot
/// change before their own write commits.
pub(crate) async fn load_entry_locked(
    txn: &DatabaseTransaction,
    entry_id: Uuid,
) -> Result<JournalEntry, JournalEntryError> {
    let header = journal_entries::Entity::find_by_id(entry_id)
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or(JournalEntryError::NotFound(entry_id))?;

    let lines = journal_entry_lines::Entity::find()
        .filter(journal_entry_lines::Column::JournalEntryId.eq(entry_id))
        .order_by_asc(journal_entry_lines::Column::LineOrder)
        .all(txn)
        .await?;

    map_entry(header, lines)
}

/// Returns true when the error is a unique constraint violation, the
/// signal to retry with a fresh generated number.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Inserts lines with their positional order.
pub(crate) async fn insert_lines(
    txn: &DatabaseTransaction,
    entry_id: Uuid,
    lines: &[JournalLineInput],
) -> Result<Vec<journal_entry_lines::Model>, JournalEntryError> {
    let now = Utc::now();
    let mut inserted = Vec::with_capacity(lines.len());

    for (index, line) in lines.iter().enumerate() {
        let (customer_id, supplier_id) = PartyRef::into_columns(line.party);
        let order = i32::try_from(index)
            .map_err(|_| JournalEntryError::Corrupt(format!("line index overflow: {index}")))?;

        let model = journal_entry_lines::ActiveModel {
            id: Set(Uuid::now_v7()),
            journal_entry_id: Set(entry_id),
            account_id: Set(line.account_id),
            line_order: Set(order),
            debit: Set(line.debit),
            credit: Set(line.credit),
            customer_id: Set(customer_id),
            supplier_id: Set(supplier_id),
            particulars: Set(line.particulars.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        inserted.push(model.insert(txn).await?);
    }

    Ok(inserted)
}

/// Maps stored rows into the domain aggregate.
pub(crate) fn map_entry(
    header: journal_entries::Model,
    lines: Vec<journal_entry_lines::Model>,
) -> Result<JournalEntry, JournalEntryError> {
    let status = JournalStatus::parse(&header.status)
        .ok_or_else(|| JournalEntryError::Corrupt(format!("unknown status: {}", header.status)))?;
    let journal_type = JournalType::parse(&header.journal_type).ok_or_else(|| {
        JournalEntryError::Corrupt(format!("unknown journal type: {}", header.journal_type))
    })?;

    Ok(JournalEntry {
        id: JournalEntryId::from_uuid(header.id),
        branch_id: BranchId::from_uuid(header.branch_id),
        entry_number: header.entry_number,
        control_number: header.control_number,
        journal_type,
        status,
        entry_date: header.entry_date,
        description: header.description,
        reference_no: header.reference_no,
        total_debit: header.total_debit,
        total_credit: header.total_credit,
        reversed_from_id: header.reversed_from_id.map(JournalEntryId::from_uuid),
        created_by: UserId::from_uuid(header.created_by),
        approved_by: header.approved_by.map(UserId::from_uuid),
        posted_at: header.posted_at,
        locked_at: header.locked_at,
        created_at: header.created_at,
        updated_at: header.updated_at,
        lines: lines
            .into_iter()
            .map(|line| JournalLine {
                id: JournalLineId::from_uuid(line.id),
                account_id: saldo_shared::types::AccountId::from_uuid(line.account_id),
                line_order: line.line_order,
                debit: line.debit,
                credit: line.credit,
                party: PartyRef::from_columns(line.customer_id, line.supplier_id),
                particulars: line.particulars,
            })
            .collect(),
    })
}
