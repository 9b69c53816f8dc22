//! Shared test harness: in-memory database plus a seeded chart of
//! accounts.
#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use saldo_core::journal::{
    AccountType, CreateJournalEntryInput, JournalLineInput, JournalType,
};
use saldo_db::migration::Migrator;
use saldo_db::repositories::{AccountRepository, CreateAccountInput};

/// Connects an in-memory SQLite database and runs all migrations.
///
/// The pool is capped at one connection: every pooled connection of an
/// in-memory SQLite database would otherwise see its own empty schema.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("failed to connect to in-memory sqlite");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    db
}

/// A database with one branch and a small chart of accounts.
pub struct Fixture {
    pub db: DatabaseConnection,
    pub branch_id: Uuid,
    pub cash: Uuid,
    pub receivables: Uuid,
    pub payables: Uuid,
    pub capital: Uuid,
    pub sales: Uuid,
    pub rent: Uuid,
}

async fn seed_account(
    repo: &AccountRepository,
    branch_id: Uuid,
    code: &str,
    name: &str,
    account_type: AccountType,
) -> Uuid {
    repo.create(CreateAccountInput {
        branch_id,
        parent_id: None,
        code: code.to_string(),
        name: name.to_string(),
        account_type,
    })
    .await
    .expect("failed to seed account")
    .id
}

/// Seeds the standard test chart of accounts.
pub async fn setup_fixture() -> Fixture {
    let db = setup_db().await;
    let branch_id = Uuid::now_v7();
    let repo = AccountRepository::new(db.clone());

    let cash = seed_account(&repo, branch_id, "1000", "Cash", AccountType::Asset).await;
    let receivables = seed_account(
        &repo,
        branch_id,
        "1100",
        "Accounts Receivable",
        AccountType::Asset,
    )
    .await;
    let payables = seed_account(
        &repo,
        branch_id,
        "2000",
        "Accounts Payable",
        AccountType::Liability,
    )
    .await;
    let capital = seed_account(&repo, branch_id, "3000", "Owner Capital", AccountType::Equity).await;
    let sales = seed_account(&repo, branch_id, "4000", "Sales Revenue", AccountType::Revenue).await;
    let rent = seed_account(&repo, branch_id, "5000", "Rent Expense", AccountType::Expense).await;

    Fixture {
        db,
        branch_id,
        cash,
        receivables,
        payables,
        capital,
        sales,
        rent,
    }
}

/// A plain debit/credit line with no party tag.
pub fn line(account_id: Uuid, debit: Decimal, credit: Decimal) -> JournalLineInput {
    JournalLineInput {
        account_id,
        debit,
        credit,
        party: None,
        particulars: None,
    }
}

/// A balanced two-line entry input: debit one account, credit another.
pub fn balanced_input(
    fixture: &Fixture,
    debit_account: Uuid,
    credit_account: Uuid,
    amount: Decimal,
    created_by: Uuid,
) -> CreateJournalEntryInput {
    CreateJournalEntryInput {
        branch_id: fixture.branch_id,
        journal_type: JournalType::General,
        entry_date: NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date"),
        description: "test entry".to_string(),
        reference_no: None,
        lines: vec![
            line(debit_account, amount, Decimal::ZERO),
            line(credit_account, Decimal::ZERO, amount),
        ],
        created_by,
    }
}
