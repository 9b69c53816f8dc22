//! Running balance arithmetic.
//!
//! Ledger balances are stored debit-positive for every account: the
//! balance after a row is always `prior + debit - credit`, regardless
//! of the account's normal side. A credit-normal account in good
//! standing therefore carries a negative stored balance; presentation
//! layers flip the sign via [`signed_for_display`].

use rust_decimal::Decimal;

use crate::journal::NormalBalance;

/// Computes the balance after applying one ledger row.
#[must_use]
pub fn next_balance(prior: Decimal, debit: Decimal, credit: Decimal) -> Decimal {
    prior + debit - credit
}

/// Converts a stored debit-positive balance into the account's natural
/// sign for display: unchanged for debit-normal accounts, negated for
/// credit-normal accounts.
#[must_use]
pub fn signed_for_display(normal: NormalBalance, stored: Decimal) -> Decimal {
    match normal {
        NormalBalance::Debit => stored,
        NormalBalance::Credit => -stored,
    }
}

/// A per-account running balance accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningBalance(Decimal);

impl RunningBalance {
    /// Starts from a prior balance.
    #[must_use]
    pub fn starting_at(prior: Decimal) -> Self {
        Self(prior)
    }

    /// Applies one row and returns the balance after it.
    pub fn apply(&mut self, debit: Decimal, credit: Decimal) -> Decimal {
        self.0 = next_balance(self.0, debit, credit);
        self.0
    }

    /// Returns the current balance.
    #[must_use]
    pub fn current(&self) -> Decimal {
        self.0
    }
}

impl Default for RunningBalance {
    fn default() -> Self {
        Self(Decimal::ZERO)
    }
}
