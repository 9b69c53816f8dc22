//! Initial migration: chart of accounts, journal, ledger, audit log.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .col(ColumnDef::new(Accounts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Accounts::BranchId).uuid().not_null())
                    .col(ColumnDef::new(Accounts::ParentId).uuid())
                    .col(ColumnDef::new(Accounts::Code).string().not_null())
                    .col(ColumnDef::new(Accounts::Name).string().not_null())
                    .col(ColumnDef::new(Accounts::AccountType).string().not_null())
                    .col(ColumnDef::new(Accounts::NormalBalance).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Accounts::DeletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accounts_parent")
                            .from(Accounts::Table, Accounts::ParentId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Non-unique: code uniqueness among live accounts is enforced in
        // the repository so tombstoned codes can be reused.
        manager
            .create_index(
                Index::create()
                    .name("idx_accounts_branch_code")
                    .table(Accounts::Table)
                    .col(Accounts::BranchId)
                    .col(Accounts::Code)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JournalEntries::Table)
                    .col(
                        ColumnDef::new(JournalEntries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(JournalEntries::BranchId).uuid().not_null())
                    .col(
                        ColumnDef::new(JournalEntries::EntryNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(JournalEntries::ControlNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(JournalEntries::JournalType).string().not_null())
                    .col(ColumnDef::new(JournalEntries::Status).string().not_null())
                    .col(ColumnDef::new(JournalEntries::EntryDate).date().not_null())
                    .col(ColumnDef::new(JournalEntries::Description).string().not_null())
                    .col(ColumnDef::new(JournalEntries::ReferenceNo).string())
                    .col(
                        ColumnDef::new(JournalEntries::TotalDebit)
                            .decimal_len(20, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JournalEntries::TotalCredit)
                            .decimal_len(20, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(JournalEntries::ReversedFromId).uuid())
                    .col(ColumnDef::new(JournalEntries::CreatedBy).uuid().not_null())
                    .col(ColumnDef::new(JournalEntries::ApprovedBy).uuid())
                    .col(ColumnDef::new(JournalEntries::PostedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(JournalEntries::LockedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(JournalEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JournalEntries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_journal_entries_branch_status")
                    .table(JournalEntries::Table)
                    .col(JournalEntries::BranchId)
                    .col(JournalEntries::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_journal_entries_entry_date")
                    .table(JournalEntries::Table)
                    .col(JournalEntries::EntryDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JournalEntryLines::Table)
                    .col(
                        ColumnDef::new(JournalEntryLines::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(JournalEntryLines::JournalEntryId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(JournalEntryLines::AccountId).uuid().not_null())
                    .col(
                        ColumnDef::new(JournalEntryLines::LineOrder)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JournalEntryLines::Debit)
                            .decimal_len(20, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JournalEntryLines::Credit)
                            .decimal_len(20, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(JournalEntryLines::CustomerId).uuid())
                    .col(ColumnDef::new(JournalEntryLines::SupplierId).uuid())
                    .col(ColumnDef::new(JournalEntryLines::Particulars).string())
                    .col(
                        ColumnDef::new(JournalEntryLines::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JournalEntryLines::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lines_journal_entry")
                            .from(JournalEntryLines::Table, JournalEntryLines::JournalEntryId)
                            .to(JournalEntries::Table, JournalEntries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lines_account")
                            .from(JournalEntryLines::Table, JournalEntryLines::AccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lines_journal_entry")
                    .table(JournalEntryLines::Table)
                    .col(JournalEntryLines::JournalEntryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Ledgers::Table)
                    .col(
                        ColumnDef::new(Ledgers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ledgers::JournalEntryId).uuid().not_null())
                    .col(ColumnDef::new(Ledgers::JournalLineId).uuid().not_null())
                    .col(ColumnDef::new(Ledgers::AccountId).uuid().not_null())
                    .col(ColumnDef::new(Ledgers::BranchId).uuid().not_null())
                    .col(ColumnDef::new(Ledgers::ControlNumber).string().not_null())
                    .col(ColumnDef::new(Ledgers::EntryDate).date().not_null())
                    .col(ColumnDef::new(Ledgers::Debit).decimal_len(20, 2).not_null())
                    .col(ColumnDef::new(Ledgers::Credit).decimal_len(20, 2).not_null())
                    .col(
                        ColumnDef::new(Ledgers::RunningBalance)
                            .decimal_len(20, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Ledgers::CustomerId).uuid())
                    .col(ColumnDef::new(Ledgers::SupplierId).uuid())
                    .col(ColumnDef::new(Ledgers::Particulars).string())
                    .col(
                        ColumnDef::new(Ledgers::PostedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Ledgers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ledgers_journal_entry")
                            .from(Ledgers::Table, Ledgers::JournalEntryId)
                            .to(JournalEntries::Table, JournalEntries::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ledgers_account")
                            .from(Ledgers::Table, Ledgers::AccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Latest-balance lookups scan (account_id, id desc).
        manager
            .create_index(
                Index::create()
                    .name("idx_ledgers_account_id")
                    .table(Ledgers::Table)
                    .col(Ledgers::AccountId)
                    .col(Ledgers::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ledgers_branch_date")
                    .table(Ledgers::Table)
                    .col(Ledgers::BranchId)
                    .col(Ledgers::EntryDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AuditLogs::Table)
                    .col(
                        ColumnDef::new(AuditLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuditLogs::BranchId).uuid().not_null())
                    .col(ColumnDef::new(AuditLogs::UserId).uuid().not_null())
                    .col(ColumnDef::new(AuditLogs::Action).string().not_null())
                    .col(ColumnDef::new(AuditLogs::EntityType).string().not_null())
                    .col(ColumnDef::new(AuditLogs::EntityId).string().not_null())
                    .col(ColumnDef::new(AuditLogs::Details).json())
                    .col(
                        ColumnDef::new(AuditLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ledgers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(JournalEntryLines::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(JournalEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    BranchId,
    ParentId,
    Code,
    Name,
    AccountType,
    NormalBalance,
    IsActive,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum JournalEntries {
    Table,
    Id,
    BranchId,
    EntryNumber,
    ControlNumber,
    JournalType,
    Status,
    EntryDate,
    Description,
    ReferenceNo,
    TotalDebit,
    TotalCredit,
    ReversedFromId,
    CreatedBy,
    ApprovedBy,
    PostedAt,
    LockedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum JournalEntryLines {
    Table,
    Id,
    JournalEntryId,
    AccountId,
    LineOrder,
    Debit,
    Credit,
    CustomerId,
    SupplierId,
    Particulars,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Ledgers {
    Table,
    Id,
    JournalEntryId,
    JournalLineId,
    AccountId,
    BranchId,
    ControlNumber,
    EntryDate,
    Debit,
    Credit,
    RunningBalance,
    CustomerId,
    SupplierId,
    Particulars,
    PostedAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AuditLogs {
    Table,
    Id,
    BranchId,
    UserId,
    Action,
    EntityType,
    EntityId,
    Details,
    CreatedAt,
}
