//! Property tests for line validation and rounding.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::JournalLineInput;
use super::validation::{round_amount, validate_lines};

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    // Amounts up to ~10M with up to 4 decimal places.
    (0i64..100_000_000_000, 0u32..=4).prop_map(|(units, scale)| Decimal::new(units, scale))
}

fn line(debit: Decimal, credit: Decimal) -> JournalLineInput {
    JournalLineInput {
        account_id: Uuid::now_v7(),
        debit,
        credit,
        party: None,
        particulars: None,
    }
}

proptest! {
    /// Rounding is idempotent.
    #[test]
    fn prop_round_idempotent(amount in amount_strategy()) {
        let once = round_amount(amount);
        prop_assert_eq!(once, round_amount(once));
    }

    /// Rounded amounts have at most 2 decimal places.
    #[test]
    fn prop_round_two_places(amount in amount_strategy()) {
        prop_assert!(round_amount(amount).scale() <= 2);
    }

    /// Mirrored entries (every debit matched by an equal credit) always
    /// validate as balanced.
    #[test]
    fn prop_mirrored_lines_balance(amounts in prop::collection::vec(amount_strategy(), 1..10)) {
        let mut lines = Vec::new();
        for amount in &amounts {
            lines.push(line(*amount, Decimal::ZERO));
            lines.push(line(Decimal::ZERO, *amount));
        }
        let totals = validate_lines(&lines).unwrap();
        prop_assert!(totals.is_balanced);
    }

    /// Adding an unmatched nonzero debit to a balanced entry makes it
    /// unbalanced.
    #[test]
    fn prop_extra_debit_unbalances(
        amounts in prop::collection::vec(amount_strategy(), 1..6),
        extra in amount_strategy(),
    ) {
        prop_assume!(round_amount(extra) > Decimal::ZERO);
        let mut lines = Vec::new();
        for amount in &amounts {
            lines.push(line(*amount, Decimal::ZERO));
            lines.push(line(Decimal::ZERO, *amount));
        }
        lines.push(line(extra, Decimal::ZERO));
        prop_assert!(validate_lines(&lines).is_err());
    }

    /// Totals reported by validation equal the rounded sums of inputs.
    #[test]
    fn prop_totals_match_rounded_sums(amounts in prop::collection::vec(amount_strategy(), 1..10)) {
        let mut lines = Vec::new();
        let mut expected = Decimal::ZERO;
        for amount in &amounts {
            lines.push(line(*amount, Decimal::ZERO));
            lines.push(line(Decimal::ZERO, *amount));
            expected += round_amount(*amount);
        }
        let expected = round_amount(expected);
        let totals = validate_lines(&lines).unwrap();
        prop_assert_eq!(totals.total_debit, expected);
        prop_assert_eq!(totals.total_credit, expected);
    }
}
