//! Line-level validation and the balance invariant.
//!
//! All amounts are rounded to 2 decimal places (half-away-from-zero)
//! before any comparison, so an entry that balances only at higher
//! precision is rejected.

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::JournalError;
use super::types::{EntryTotals, JournalLineInput};

/// Minimum number of lines in a journal entry.
pub const MIN_LINES: usize = 2;

/// Rounds an amount to 2 decimal places, half-away-from-zero.
#[must_use]
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Validates journal lines and computes rounded totals.
///
/// Checks, in order:
/// 1. At least [`MIN_LINES`] lines.
/// 2. No negative debit or credit on any line.
/// 3. Rounded total debits equal rounded total credits.
///
/// A line may carry both a debit and a credit, or neither; only the
/// totals are constrained.
pub fn validate_lines(lines: &[JournalLineInput]) -> Result<EntryTotals, JournalError> {
    if lines.len() < MIN_LINES {
        return Err(JournalError::InsufficientLines { count: lines.len() });
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    for (index, line) in lines.iter().enumerate() {
        if line.debit.is_sign_negative() && !line.debit.is_zero() {
            return Err(JournalError::NegativeAmount {
                line: index,
                amount: line.debit,
            });
        }
        if line.credit.is_sign_negative() && !line.credit.is_zero() {
            return Err(JournalError::NegativeAmount {
                line: index,
                amount: line.credit,
            });
        }
        total_debit += round_amount(line.debit);
        total_credit += round_amount(line.credit);
    }

    let total_debit = round_amount(total_debit);
    let total_credit = round_amount(total_credit);

    if total_debit != total_credit {
        return Err(JournalError::Unbalanced {
            debit: total_debit,
            credit: total_credit,
        });
    }

    Ok(EntryTotals::new(total_debit, total_credit))
}
