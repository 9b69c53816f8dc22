//! Report repository: trial balance, financial statements, and books.
//!
//! Balances are folded from ledger rows in `Decimal` arithmetic rather
//! than pushed down as SQL aggregates, so the figures stay exact on
//! every backend.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use saldo_core::journal::{AccountType, JournalEntry, JournalStatus};
use saldo_core::reports::{
    AccountActivity, BalanceSheet, IncomeStatement, ReportError, ReportService, TrialBalance,
};
use saldo_shared::types::{AccountId, PageRequest, PageResponse, PartyRef};

use crate::entities::{accounts, journal_entries, journal_entry_lines, ledgers};

use super::journal_entry::map_entry;
use super::ledger::LedgerRow;

/// An account's ledger over a period, with its opening balance.
#[derive(Debug, Clone)]
pub struct GeneralLedgerBook {
    /// The account.
    pub account_id: Uuid,
    /// Balance carried in from before the period.
    pub opening_balance: Decimal,
    /// Rows within the period, in projection order.
    pub rows: Vec<LedgerRow>,
}

/// One row of a subsidiary ledger.
#[derive(Debug, Clone)]
pub struct SubsidiaryRow {
    /// Entry date.
    pub entry_date: NaiveDate,
    /// The entry that produced the row.
    pub journal_entry_id: Uuid,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Particulars.
    pub particulars: Option<String>,
}

/// One party's subsidiary ledger with its outstanding balance.
#[derive(Debug, Clone)]
pub struct SubsidiaryLedger {
    /// The customer or supplier.
    pub party: PartyRef,
    /// Rows in projection order.
    pub rows: Vec<SubsidiaryRow>,
    /// Outstanding balance in the party's natural sign: debits minus
    /// credits for receivables, credits minus debits for payables.
    pub balance: Decimal,
}

/// Report repository over the ledger and journal.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
    service: ReportService,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            service: ReportService,
        }
    }

    /// Builds a trial balance over an entry date range (inclusive on
    /// both ends, each bound optional). Without a branch filter, it
    /// aggregates across all branches.
    pub async fn trial_balance(
        &self,
        branch_id: Option<Uuid>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<TrialBalance, ReportError> {
        if let (Some(from), Some(to)) = (from, to) {
            self.service.check_period(from, to)?;
        }
        let activities = self.account_activities(branch_id, from, to).await?;
        Ok(self.service.trial_balance(activities))
    }

    /// Builds a balance sheet as of a date: all ledger activity up to
    /// and including it, branch-filtered when requested.
    pub async fn balance_sheet(
        &self,
        branch_id: Option<Uuid>,
        as_of: NaiveDate,
    ) -> Result<BalanceSheet, ReportError> {
        let activities = self.account_activities(branch_id, None, Some(as_of)).await?;
        Ok(self.service.balance_sheet(&activities))
    }

    /// Builds an income statement over a period, branch-filtered when
    /// requested.
    pub async fn income_statement(
        &self,
        branch_id: Option<Uuid>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<IncomeStatement, ReportError> {
        self.service.check_period(from, to)?;
        let activities = self
            .account_activities(branch_id, Some(from), Some(to))
            .await?;
        Ok(self.service.income_statement(&activities))
    }

    /// The journal book: non-draft entries in entry date order, with
    /// their lines.
    pub async fn journal_book(
        &self,
        branch_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
        page: PageRequest,
    ) -> Result<PageResponse<JournalEntry>, ReportError> {
        self.service.check_period(from, to)?;

        let paginator = journal_entries::Entity::find()
            .filter(journal_entries::Column::BranchId.eq(branch_id))
            .filter(journal_entries::Column::Status.ne(JournalStatus::Draft.as_str()))
            .filter(journal_entries::Column::EntryDate.gte(from))
            .filter(journal_entries::Column::EntryDate.lte(to))
            .order_by_asc(journal_entries::Column::EntryDate)
            .order_by_asc(journal_entries::Column::EntryNumber)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await.map_err(storage)?;
        let headers = paginator
            .fetch_page(page.zero_indexed_page())
            .await
            .map_err(storage)?;

        let mut data = Vec::with_capacity(headers.len());
        for header in headers {
            let lines = journal_entry_lines::Entity::find()
                .filter(journal_entry_lines::Column::JournalEntryId.eq(header.id))
                .order_by_asc(journal_entry_lines::Column::LineOrder)
                .all(&self.db)
                .await
                .map_err(storage)?;
            let entry =
                map_entry(header, lines).map_err(|err| ReportError::Storage(err.to_string()))?;
            data.push(entry);
        }

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// The general ledger book for one account over a period.
    pub async fn general_ledger_book(
        &self,
        account_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<GeneralLedgerBook, ReportError> {
        self.service.check_period(from, to)?;

        let prior_rows = ledgers::Entity::find()
            .filter(ledgers::Column::AccountId.eq(account_id))
            .filter(ledgers::Column::EntryDate.lt(from))
            .all(&self.db)
            .await
            .map_err(storage)?;
        let opening_balance = prior_rows
            .iter()
            .fold(Decimal::ZERO, |acc, row| acc + row.debit - row.credit);

        let rows = ledgers::Entity::find()
            .filter(ledgers::Column::AccountId.eq(account_id))
            .filter(ledgers::Column::EntryDate.gte(from))
            .filter(ledgers::Column::EntryDate.lte(to))
            .order_by_asc(ledgers::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage)?;

        Ok(GeneralLedgerBook {
            account_id,
            opening_balance,
            rows: rows.into_iter().map(LedgerRow::from).collect(),
        })
    }

    /// Accounts receivable subsidiary ledgers: one per customer with
    /// tagged ledger rows, balance debit-positive.
    pub async fn ar_subsidiary(
        &self,
        branch_id: Uuid,
    ) -> Result<Vec<SubsidiaryLedger>, ReportError> {
        let rows = ledgers::Entity::find()
            .filter(ledgers::Column::BranchId.eq(branch_id))
            .filter(ledgers::Column::CustomerId.is_not_null())
            .order_by_asc(ledgers::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage)?;

        Ok(group_subsidiary(rows, false))
    }

    /// Accounts payable subsidiary ledgers: one per supplier with
    /// tagged ledger rows, balance credit-positive.
    pub async fn ap_subsidiary(
        &self,
        branch_id: Uuid,
    ) -> Result<Vec<SubsidiaryLedger>, ReportError> {
        let rows = ledgers::Entity::find()
            .filter(ledgers::Column::BranchId.eq(branch_id))
            .filter(ledgers::Column::SupplierId.is_not_null())
            .filter(ledgers::Column::CustomerId.is_null())
            .order_by_asc(ledgers::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage)?;

        Ok(group_subsidiary(rows, true))
    }

    /// Folds ledger rows into per-account debit/credit sums for a
    /// branch, over an optional entry date window. Tombstoned accounts
    /// keep their history and appear when they saw activity.
    async fn account_activities(
        &self,
        branch_id: Option<Uuid>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AccountActivity>, ReportError> {
        let mut account_query = accounts::Entity::find().order_by_asc(accounts::Column::Code);
        if let Some(branch_id) = branch_id {
            account_query = account_query.filter(accounts::Column::BranchId.eq(branch_id));
        }
        let account_models = account_query.all(&self.db).await.map_err(storage)?;

        let mut query = ledgers::Entity::find();
        if let Some(branch_id) = branch_id {
            query = query.filter(ledgers::Column::BranchId.eq(branch_id));
        }
        if let Some(from) = from {
            query = query.filter(ledgers::Column::EntryDate.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(ledgers::Column::EntryDate.lte(to));
        }
        let rows = query.all(&self.db).await.map_err(storage)?;

        let mut sums: HashMap<Uuid, (Decimal, Decimal)> = HashMap::new();
        for row in rows {
            let entry = sums.entry(row.account_id).or_default();
            entry.0 += row.debit;
            entry.1 += row.credit;
        }

        let mut activities = Vec::with_capacity(account_models.len());
        for model in account_models {
            let account_type = AccountType::parse(&model.account_type).ok_or_else(|| {
                ReportError::Storage(format!("unknown account type: {}", model.account_type))
            })?;
            let (debit_total, credit_total) =
                sums.get(&model.id).copied().unwrap_or_default();
            activities.push(AccountActivity {
                account_id: AccountId::from_uuid(model.id),
                code: model.code,
                name: model.name,
                account_type,
                debit_total,
                credit_total,
            });
        }

        Ok(activities)
    }
}

fn storage(err: DbErr) -> ReportError {
    ReportError::Storage(err.to_string())
}

fn group_subsidiary(rows: Vec<ledgers::Model>, credit_positive: bool) -> Vec<SubsidiaryLedger> {
    let mut grouped: Vec<(PartyRef, SubsidiaryLedger)> = Vec::new();

    for row in rows {
        let Some(party) = PartyRef::from_columns(row.customer_id, row.supplier_id) else {
            continue;
        };
        let delta = if credit_positive {
            row.credit - row.debit
        } else {
            row.debit - row.credit
        };
        let subsidiary_row = SubsidiaryRow {
            entry_date: row.entry_date,
            journal_entry_id: row.journal_entry_id,
            debit: row.debit,
            credit: row.credit,
            particulars: row.particulars,
        };

        if let Some((_, ledger)) = grouped.iter_mut().find(|(p, _)| *p == party) {
            ledger.rows.push(subsidiary_row);
            ledger.balance += delta;
        } else {
            grouped.push((
                party,
                SubsidiaryLedger {
                    party,
                    rows: vec![subsidiary_row],
                    balance: delta,
                },
            ));
        }
    }

    grouped.into_iter().map(|(_, ledger)| ledger).collect()
}
