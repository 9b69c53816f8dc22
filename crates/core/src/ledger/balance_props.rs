//! Property tests for ledger projection.

use std::collections::HashMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use saldo_shared::types::{AccountId, JournalEntryId, JournalLineId};

use super::projection::{LedgerProjector, SourceLine};

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000_00, Just(2u32)).prop_map(|(units, scale)| Decimal::new(units, scale))
}

fn lines_strategy() -> impl Strategy<Value = Vec<(usize, Decimal, Decimal)>> {
    // (account index into a small pool, debit, credit)
    prop::collection::vec((0usize..4, amount_strategy(), amount_strategy()), 1..20)
}

fn build_lines(
    moves: &[(usize, Decimal, Decimal)],
    accounts: &[AccountId],
) -> Vec<SourceLine> {
    moves.iter()
        .map(|&(idx, debit, credit)| SourceLine {
            line_id: JournalLineId::new(),
            account_id: accounts[idx],
            debit,
            credit,
            party: None,
            particulars: None,
        })
        .collect()
}

proptest! {
    /// The final running balance per account equals the prior balance
    /// plus the sum of that account's debits minus credits.
    #[test]
    fn prop_final_balance_is_net_movement(moves in lines_strategy()) {
        let accounts: Vec<AccountId> = (0..4).map(|_| AccountId::new()).collect();
        let lines = build_lines(&moves, &accounts);
        let rows = LedgerProjector::new().project(
            JournalEntryId::new(),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            lines,
            &HashMap::new(),
        );

        let mut expected: HashMap<AccountId, Decimal> = HashMap::new();
        for &(idx, debit, credit) in &moves {
            *expected.entry(accounts[idx]).or_default() += debit - credit;
        }
        let mut finals: HashMap<AccountId, Decimal> = HashMap::new();
        for row in &rows {
            finals.insert(row.account_id, row.running_balance);
        }

        for (account, net) in expected {
            prop_assert_eq!(finals[&account], net);
        }
    }

    /// Each row's balance differs from the previous row of the same
    /// account by exactly that row's debit minus credit.
    #[test]
    fn prop_consecutive_rows_chain(moves in lines_strategy()) {
        let accounts: Vec<AccountId> = (0..4).map(|_| AccountId::new()).collect();
        let lines = build_lines(&moves, &accounts);
        let rows = LedgerProjector::new().project(
            JournalEntryId::new(),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            lines,
            &HashMap::new(),
        );

        let mut last: HashMap<AccountId, Decimal> = HashMap::new();
        for row in &rows {
            let prior = last.get(&row.account_id).copied().unwrap_or(Decimal::ZERO);
            prop_assert_eq!(row.running_balance, prior + row.debit - row.credit);
            last.insert(row.account_id, row.running_balance);
        }
    }

    /// Projection emits exactly one row per input line, in order.
    #[test]
    fn prop_one_row_per_line(moves in lines_strategy()) {
        let accounts: Vec<AccountId> = (0..4).map(|_| AccountId::new()).collect();
        let lines = build_lines(&moves, &accounts);
        let expected: Vec<JournalLineId> = lines.iter().map(|l| l.line_id).collect();
        let rows = LedgerProjector::new().project(
            JournalEntryId::new(),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            lines,
            &HashMap::new(),
        );

        let got: Vec<JournalLineId> = rows.iter().map(|r| r.journal_line_id).collect();
        prop_assert_eq!(got, expected);
    }

    /// Projecting a mirrored reversal batch after the original returns
    /// every touched account to its prior balance.
    #[test]
    fn prop_reversal_restores_balances(moves in lines_strategy()) {
        let accounts: Vec<AccountId> = (0..4).map(|_| AccountId::new()).collect();
        let projector = LedgerProjector::new();
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();

        let rows = projector.project(
            JournalEntryId::new(),
            date,
            build_lines(&moves, &accounts),
            &HashMap::new(),
        );
        let mut prior: HashMap<AccountId, Decimal> = HashMap::new();
        for row in &rows {
            prior.insert(row.account_id, row.running_balance);
        }

        let mirrored: Vec<(usize, Decimal, Decimal)> =
            moves.iter().map(|&(idx, d, c)| (idx, c, d)).collect();
        let reversal_rows = projector.project(
            JournalEntryId::new(),
            date,
            build_lines(&mirrored, &accounts),
            &prior,
        );

        let mut finals: HashMap<AccountId, Decimal> = HashMap::new();
        for row in &reversal_rows {
            finals.insert(row.account_id, row.running_balance);
        }
        for balance in finals.values() {
            prop_assert_eq!(*balance, Decimal::ZERO);
        }
    }
}
