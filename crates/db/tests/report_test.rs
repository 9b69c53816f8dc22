//! Integration tests for reports and books.

mod common;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use saldo_core::journal::{AccountType, CreateJournalEntryInput, JournalType};
use saldo_core::reports::ReportError;
use saldo_db::repositories::{
    AccountRepository, CreateAccountInput, JournalEntryRepository, PostingRepository,
    ReportRepository,
};
use saldo_shared::types::{CustomerId, PageRequest, PartyRef, SupplierId};

use common::{Fixture, balanced_input, line, setup_fixture};

async fn post_entry(
    fixture: &Fixture,
    input: CreateJournalEntryInput,
) -> saldo_core::journal::JournalEntry {
    let entries = JournalEntryRepository::new(fixture.db.clone());
    let posting = PostingRepository::new(fixture.db.clone());
    let draft = entries.create(input).await.expect("create should succeed");
    posting
        .post(draft.id.into_inner(), Uuid::now_v7())
        .await
        .expect("post should succeed")
}

fn dated(mut input: CreateJournalEntryInput, date: NaiveDate) -> CreateJournalEntryInput {
    input.entry_date = date;
    input
}

#[tokio::test]
async fn test_trial_balance_columns() {
    let fixture = setup_fixture().await;
    let reports = ReportRepository::new(fixture.db.clone());

    post_entry(
        &fixture,
        balanced_input(&fixture, fixture.cash, fixture.sales, dec!(1000.00), Uuid::now_v7()),
    )
    .await;
    post_entry(
        &fixture,
        balanced_input(&fixture, fixture.rent, fixture.cash, dec!(300.00), Uuid::now_v7()),
    )
    .await;

    let tb = reports
        .trial_balance(Some(fixture.branch_id), None, None)
        .await
        .expect("trial balance should build");

    assert!(tb.is_balanced);
    assert_eq!(tb.total_debit, dec!(1300.00));
    assert_eq!(tb.total_credit, dec!(1300.00));

    let cash = tb.rows.iter().find(|r| r.code == "1000").expect("cash row");
    assert_eq!(cash.debit, dec!(1000.00));
    assert_eq!(cash.credit, dec!(300.00));

    let sales = tb.rows.iter().find(|r| r.code == "4000").expect("sales row");
    assert_eq!(sales.debit, Decimal::ZERO);
    assert_eq!(sales.credit, dec!(1000.00));

    // Untouched accounts are dropped.
    assert!(tb.rows.iter().all(|r| r.code != "2000"));
}

#[tokio::test]
async fn test_trial_balance_without_branch_filter_spans_branches() {
    let fixture = setup_fixture().await;
    let reports = ReportRepository::new(fixture.db.clone());
    let accounts = AccountRepository::new(fixture.db.clone());

    let other_branch = Uuid::now_v7();
    let other_cash = accounts
        .create(CreateAccountInput {
            branch_id: other_branch,
            parent_id: None,
            code: "1000".to_string(),
            name: "Cash".to_string(),
            account_type: AccountType::Asset,
        })
        .await
        .expect("seed account")
        .id;
    let other_sales = accounts
        .create(CreateAccountInput {
            branch_id: other_branch,
            parent_id: None,
            code: "4000".to_string(),
            name: "Sales Revenue".to_string(),
            account_type: AccountType::Revenue,
        })
        .await
        .expect("seed account")
        .id;

    post_entry(
        &fixture,
        balanced_input(&fixture, fixture.cash, fixture.sales, dec!(1000.00), Uuid::now_v7()),
    )
    .await;
    post_entry(
        &fixture,
        CreateJournalEntryInput {
            branch_id: other_branch,
            journal_type: JournalType::General,
            entry_date: NaiveDate::from_ymd_opt(2026, 1, 20).expect("valid date"),
            description: "other branch entry".to_string(),
            reference_no: None,
            lines: vec![
                line(other_cash, dec!(250.00), Decimal::ZERO),
                line(other_sales, Decimal::ZERO, dec!(250.00)),
            ],
            created_by: Uuid::now_v7(),
        },
    )
    .await;

    let all = reports
        .trial_balance(None, None, None)
        .await
        .expect("trial balance should build");
    assert_eq!(all.total_debit, dec!(1250.00));
    assert_eq!(all.total_credit, dec!(1250.00));
    assert!(all.is_balanced);

    let scoped = reports
        .trial_balance(Some(fixture.branch_id), None, None)
        .await
        .expect("trial balance should build");
    assert_eq!(scoped.total_debit, dec!(1000.00));
}

#[tokio::test]
async fn test_balance_sheet_and_income_statement() {
    let fixture = setup_fixture().await;
    let reports = ReportRepository::new(fixture.db.clone());
    let date = NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date");

    // 5000 capital in, 1000 sale, 300 rent.
    post_entry(
        &fixture,
        balanced_input(&fixture, fixture.cash, fixture.capital, dec!(5000.00), Uuid::now_v7()),
    )
    .await;
    post_entry(
        &fixture,
        balanced_input(&fixture, fixture.cash, fixture.sales, dec!(1000.00), Uuid::now_v7()),
    )
    .await;
    post_entry(
        &fixture,
        balanced_input(&fixture, fixture.rent, fixture.cash, dec!(300.00), Uuid::now_v7()),
    )
    .await;

    let sheet = reports
        .balance_sheet(Some(fixture.branch_id), date)
        .await
        .expect("balance sheet should build");
    assert_eq!(sheet.assets.total, dec!(5700.00));
    assert_eq!(sheet.equity.total, dec!(5000.00));
    assert_eq!(sheet.net_income, dec!(700.00));
    assert!(sheet.is_balanced);

    let statement = reports
        .income_statement(
            Some(fixture.branch_id),
            NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date"),
            NaiveDate::from_ymd_opt(2026, 1, 31).expect("valid date"),
        )
        .await
        .expect("income statement should build");
    assert_eq!(statement.revenue.total, dec!(1000.00));
    assert_eq!(statement.expenses.total, dec!(300.00));
    assert_eq!(statement.net_income, dec!(700.00));
}

#[tokio::test]
async fn test_income_statement_rejects_inverted_period() {
    let fixture = setup_fixture().await;
    let reports = ReportRepository::new(fixture.db.clone());

    let err = reports
        .income_statement(
            Some(fixture.branch_id),
            NaiveDate::from_ymd_opt(2026, 2, 1).expect("valid date"),
            NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::InvalidPeriod { .. }));
}

#[tokio::test]
async fn test_journal_book_excludes_drafts() {
    let fixture = setup_fixture().await;
    let entries = JournalEntryRepository::new(fixture.db.clone());
    let reports = ReportRepository::new(fixture.db.clone());

    post_entry(
        &fixture,
        balanced_input(&fixture, fixture.cash, fixture.sales, dec!(100.00), Uuid::now_v7()),
    )
    .await;
    entries
        .create(balanced_input(
            &fixture,
            fixture.cash,
            fixture.sales,
            dec!(50.00),
            Uuid::now_v7(),
        ))
        .await
        .expect("create should succeed");

    let book = reports
        .journal_book(
            fixture.branch_id,
            NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date"),
            NaiveDate::from_ymd_opt(2026, 1, 31).expect("valid date"),
            PageRequest::default(),
        )
        .await
        .expect("journal book should build");

    assert_eq!(book.meta.total, 1);
    assert_eq!(book.data[0].total_debit, dec!(100.00));
    assert_eq!(book.data[0].lines.len(), 2);
}

#[tokio::test]
async fn test_general_ledger_book_opening_balance() {
    let fixture = setup_fixture().await;
    let reports = ReportRepository::new(fixture.db.clone());
    let january = NaiveDate::from_ymd_opt(2026, 1, 10).expect("valid date");
    let february = NaiveDate::from_ymd_opt(2026, 2, 10).expect("valid date");

    post_entry(
        &fixture,
        dated(
            balanced_input(&fixture, fixture.cash, fixture.sales, dec!(500.00), Uuid::now_v7()),
            january,
        ),
    )
    .await;
    post_entry(
        &fixture,
        dated(
            balanced_input(&fixture, fixture.cash, fixture.sales, dec!(200.00), Uuid::now_v7()),
            february,
        ),
    )
    .await;

    let book = reports
        .general_ledger_book(
            fixture.cash,
            NaiveDate::from_ymd_opt(2026, 2, 1).expect("valid date"),
            NaiveDate::from_ymd_opt(2026, 2, 28).expect("valid date"),
        )
        .await
        .expect("general ledger book should build");

    assert_eq!(book.opening_balance, dec!(500.00));
    assert_eq!(book.rows.len(), 1);
    assert_eq!(book.rows[0].running_balance, dec!(700.00));
}

#[tokio::test]
async fn test_subsidiary_ledgers_group_by_party() {
    let fixture = setup_fixture().await;
    let reports = ReportRepository::new(fixture.db.clone());
    let customer = CustomerId::new();
    let supplier = SupplierId::new();

    // Credit sale to a customer: AR 400 dr / sales 400 cr.
    let mut sale = balanced_input(
        &fixture,
        fixture.receivables,
        fixture.sales,
        dec!(400.00),
        Uuid::now_v7(),
    );
    sale.journal_type = JournalType::Sales;
    sale.lines[0].party = Some(PartyRef::Customer(customer));
    post_entry(&fixture, sale).await;

    // Customer pays 150: cash 150 dr / AR 150 cr.
    let mut receipt = balanced_input(
        &fixture,
        fixture.cash,
        fixture.receivables,
        dec!(150.00),
        Uuid::now_v7(),
    );
    receipt.lines[1].party = Some(PartyRef::Customer(customer));
    post_entry(&fixture, receipt).await;

    // Purchase on account from a supplier: rent 250 dr / AP 250 cr.
    let mut purchase = balanced_input(
        &fixture,
        fixture.rent,
        fixture.payables,
        dec!(250.00),
        Uuid::now_v7(),
    );
    purchase.journal_type = JournalType::Purchase;
    purchase.lines[1].party = Some(PartyRef::Supplier(supplier));
    post_entry(&fixture, purchase).await;

    let ar = reports
        .ar_subsidiary(fixture.branch_id)
        .await
        .expect("AR subsidiary should build");
    assert_eq!(ar.len(), 1);
    assert_eq!(ar[0].party, PartyRef::Customer(customer));
    assert_eq!(ar[0].rows.len(), 2);
    assert_eq!(ar[0].balance, dec!(250.00));

    let ap = reports
        .ap_subsidiary(fixture.branch_id)
        .await
        .expect("AP subsidiary should build");
    assert_eq!(ap.len(), 1);
    assert_eq!(ap[0].party, PartyRef::Supplier(supplier));
    assert_eq!(ap[0].balance, dec!(250.00));
}

#[tokio::test]
async fn test_trial_balance_as_of_date() {
    let fixture = setup_fixture().await;
    let reports = ReportRepository::new(fixture.db.clone());
    let january = NaiveDate::from_ymd_opt(2026, 1, 10).expect("valid date");
    let february = NaiveDate::from_ymd_opt(2026, 2, 10).expect("valid date");

    post_entry(
        &fixture,
        dated(
            balanced_input(&fixture, fixture.cash, fixture.sales, dec!(500.00), Uuid::now_v7()),
            january,
        ),
    )
    .await;
    post_entry(
        &fixture,
        dated(
            balanced_input(&fixture, fixture.cash, fixture.sales, dec!(200.00), Uuid::now_v7()),
            february,
        ),
    )
    .await;

    let tb = reports
        .trial_balance(
            Some(fixture.branch_id),
            None,
            Some(NaiveDate::from_ymd_opt(2026, 1, 31).expect("valid date")),
        )
        .await
        .expect("trial balance should build");
    assert_eq!(tb.total_debit, dec!(500.00));
    assert!(tb.is_balanced);
}
