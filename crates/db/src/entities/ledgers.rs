//! `SeaORM` Entity for the append-only ledgers table.
//!
//! Rows are only ever inserted. The integer primary key doubles as the
//! projection order: the latest row per account carries that account's
//! current running balance.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ledgers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub journal_entry_id: Uuid,
    pub journal_line_id: Uuid,
    pub account_id: Uuid,
    pub branch_id: Uuid,
    /// Copied from the entry for cross-document traceability.
    pub control_number: String,
    pub entry_date: Date,
    pub debit: Decimal,
    pub credit: Decimal,
    /// Debit-positive balance after this row.
    pub running_balance: Decimal,
    pub customer_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub particulars: Option<String>,
    pub posted_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::journal_entries::Entity",
        from = "Column::JournalEntryId",
        to = "super::journal_entries::Column::Id"
    )]
    JournalEntries,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id"
    )]
    Accounts,
}

impl Related<super::journal_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntries.def()
    }
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
