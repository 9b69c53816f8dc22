//! Projecting a posted entry's lines into ledger rows.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use saldo_shared::types::{AccountId, JournalEntryId, JournalLineId, PartyRef};

use super::balance::RunningBalance;

/// One journal line as input to projection, already in stored order.
#[derive(Debug, Clone)]
pub struct SourceLine {
    /// The journal line id.
    pub line_id: JournalLineId,
    /// The account the line posts to.
    pub account_id: AccountId,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Party tag carried onto the ledger row.
    pub party: Option<PartyRef>,
    /// Particulars carried onto the ledger row.
    pub particulars: Option<String>,
}

/// One ledger row produced by projection, ready for insertion.
#[derive(Debug, Clone)]
pub struct ProjectedRow {
    /// The entry that produced this row.
    pub journal_entry_id: JournalEntryId,
    /// The line that produced this row.
    pub journal_line_id: JournalLineId,
    /// The account the row belongs to.
    pub account_id: AccountId,
    /// The entry date stamped on the row.
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

/// Projects an entry's lines into ledger rows with running balances.
#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerProjector;

impl LedgerProjector {
    /// Creates a new projector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Projects `lines` in order, threading each account's running
    /// balance through the batch.
    ///
    /// `prior_balances` holds the latest stored balance per account;
    /// accounts absent from the map start at zero. When an entry hits
    /// the same account on several lines, each row sees the balance
    /// left by the previous one.
    #[must_use]
    pub fn project(
        &self,
        entry_id: JournalEntryId,
        entry_date: NaiveDate,
        lines: Vec<SourceLine>,
        prior_balances: &HashMap<AccountId, Decimal>,
    ) -> Vec<ProjectedRow> {
        let mut balances: HashMap<AccountId, RunningBalance> = HashMap::new();

        lines
            .into_iter()
            .map(|line| {
                let balance = balances.entry(line.account_id).or_insert_with(|| {
                    RunningBalance::starting_at(
                        prior_balances
                            .get(&line.account_id)
                            .copied()
                            .unwrap_or(Decimal::ZERO),
                    )
                });
                let running_balance = balance.apply(line.debit, line.credit);

                ProjectedRow {
                    journal_entry_id: entry_id,
                    journal_line_id: line.line_id,
                    account_id: line.account_id,
                    entry_date,
                    debit: line.debit,
                    credit: line.credit,
                    running_balance,
                    party: line.party,
                    particulars: line.particulars,
                }
            })
            .collect()
    }
}
