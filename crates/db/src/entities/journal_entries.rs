//! `SeaORM` Entity for the journal_entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub branch_id: Uuid,
    #[sea_orm(unique)]
    pub entry_number: String,
    #[sea_orm(unique)]
    pub control_number: String,
    /// One of: general, sales, purchase, cash_receipts, cash_disbursements.
    pub journal_type: String,
    /// One of: draft, posted, reversed.
    pub status: String,
    pub entry_date: Date,
    pub description: String,
    pub reference_no: Option<String>,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    /// Set on reversal drafts, pointing at the entry being reversed.
    pub reversed_from_id: Option<Uuid>,
    pub created_by: Uuid,
    pub approved_by: Option<Uuid>,
    pub posted_at: Option<DateTimeUtc>,
    /// Set at posting time; an entry with a lock timestamp never changes.
    pub locked_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::journal_entry_lines::Entity")]
    JournalEntryLines,
    #[sea_orm(has_many = "super::ledgers::Entity")]
    Ledgers,
}

impl Related<super::journal_entry_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntryLines.def()
    }
}

impl Related<super::ledgers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ledgers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
