//! Ledger repository for read-side queries over the append-only ledger.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use saldo_shared::types::{PageRequest, PageResponse, PartyRef};

use crate::entities::ledgers;

/// One ledger row for presentation.
#[derive(Debug, Clone)]
pub struct LedgerRow {
    /// Row id, also the projection order.
    pub id: i64,
    /// The entry that produced this row.
    pub journal_entry_id: Uuid,
    /// The account the row belongs to.
    pub account_id: Uuid,
    /// The entry's control number, copied for traceability.
    pub control_number: String,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Debit-positive balance after this row.
    pub running_balance: Decimal,
    /// Party tag.
    pub party: Option<PartyRef>,
    /// Particulars.
    pub particulars: Option<String>,
}

impl From<ledgers::Model> for LedgerRow {
    fn from(model: ledgers::Model) -> Self {
        Self {
            id: model.id,
            journal_entry_id: model.journal_entry_id,
            account_id: model.account_id,
            control_number: model.control_number,
            entry_date: model.entry_date,
            debit: model.debit,
            credit: model.credit,
            running_balance: model.running_balance,
            party: PartyRef::from_columns(model.customer_id, model.supplier_id),
            particulars: model.particulars,
        }
    }
}

/// Ledger repository for balance and history queries.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns an account's current balance: the running balance on its
    /// latest ledger row, or zero for an account with no activity.
    pub async fn latest_balance(&self, account_id: Uuid) -> Result<Decimal, DbErr> {
        let latest = ledgers::Entity::find()
            .filter(ledgers::Column::AccountId.eq(account_id))
            .order_by_desc(ledgers::Column::Id)
            .limit(1)
            .one(&self.db)
            .await?;

        Ok(latest.map_or(Decimal::ZERO, |row| row.running_balance))
    }

    /// Returns an account's ledger rows in projection order, optionally
    /// bounded by entry date.
    pub async fn account_ledger(
        &self,
        account_id: Uuid,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        page: PageRequest,
    ) -> Result<PageResponse<LedgerRow>, DbErr> {
        let mut query = ledgers::Entity::find()
            .filter(ledgers::Column::AccountId.eq(account_id));

        if let Some(from) = date_from {
            query = query.filter(ledgers::Column::EntryDate.gte(from));
        }
        if let Some(to) = date_to {
            query = query.filter(ledgers::Column::EntryDate.lte(to));
        }

        let paginator = query
            .order_by_asc(ledgers::Column::Id)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.zero_indexed_page()).await?;

        Ok(PageResponse::new(
            rows.into_iter().map(LedgerRow::from).collect(),
            page.page,
            page.per_page,
            total,
        ))
    }

    /// Returns the rows a single entry projected, in projection order.
    pub async fn entry_rows(&self, entry_id: Uuid) -> Result<Vec<LedgerRow>, DbErr> {
        let rows = ledgers::Entity::find()
            .filter(ledgers::Column::JournalEntryId.eq(entry_id))
            .order_by_asc(ledgers::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(LedgerRow::from).collect())
    }
}
