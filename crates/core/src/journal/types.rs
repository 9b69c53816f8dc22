//! Journal domain types for entry creation and validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use saldo_shared::types::PartyRef;

/// Account classification in the chart of accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources owned (cash, receivables, inventory).
    Asset,
    /// Obligations owed (payables, loans).
    Liability,
    /// Owner claims on the business.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

impl AccountType {
    /// Returns the string representation of the account type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }

    /// Parses an account type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asset" => Some(Self::Asset),
            "liability" => Some(Self::Liability),
            "equity" => Some(Self::Equity),
            "revenue" => Some(Self::Revenue),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Returns the side on which this account type normally carries its
    /// balance.
    #[must_use]
    pub fn normal_balance(&self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normal balance side of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-normal (assets, expenses).
    Debit,
    /// Credit-normal (liabilities, equity, revenue).
    Credit,
}

impl NormalBalance {
    /// Returns the string representation of the balance side.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }

    /// Parses a balance side from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "debit" => Some(Self::Debit),
            "credit" => Some(Self::Credit),
            _ => None,
        }
    }
}

/// Journal book classification.
///
/// Classification only: the posting logic is identical for every type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalType {
    /// General journal.
    General,
    /// Sales journal.
    Sales,
    /// Purchase journal.
    Purchase,
    /// Cash receipts journal.
    CashReceipts,
    /// Cash disbursements journal.
    CashDisbursements,
}

impl JournalType {
    /// Returns the string representation of the journal type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Sales => "sales",
            Self::Purchase => "purchase",
            Self::CashReceipts => "cash_receipts",
            Self::CashDisbursements => "cash_disbursements",
        }
    }

    /// Parses a journal type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "general" => Some(Self::General),
            "sales" => Some(Self::Sales),
            "purchase" => Some(Self::Purchase),
            "cash_receipts" => Some(Self::CashReceipts),
            "cash_disbursements" => Some(Self::CashDisbursements),
            _ => None,
        }
    }
}

impl std::fmt::Display for JournalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Journal entry status in the posting lifecycle.
///
/// The valid transitions are:
/// - Draft → Posted (post, by a user other than the creator)
/// - Posted → Reversed (reverse, which also creates a new draft entry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalStatus {
    /// Entry is being drafted and can be modified or deleted.
    Draft,
    /// Entry has been posted to the ledger (immutable).
    Posted,
    /// Entry has been reversed (terminal, immutable).
    Reversed,
}

impl JournalStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Posted => "posted",
            Self::Reversed => "reversed",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "posted" => Some(Self::Posted),
            "reversed" => Some(Self::Reversed),
            _ => None,
        }
    }

    /// Returns true if the entry can be modified or deleted.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the entry is immutable.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        matches!(self, Self::Posted | Self::Reversed)
    }
}

impl std::fmt::Display for JournalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input for a single line of a new journal entry.
///
/// A line carries either a debit or a credit in practice. The aggregate
/// only checks totals, so a line with both sides zero (or both nonzero)
/// is accepted; negative amounts are not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLineInput {
    /// The account to post to.
    pub account_id: Uuid,
    /// Debit amount (>= 0).
    pub debit: Decimal,
    /// Credit amount (>= 0).
    pub credit: Decimal,
    /// Optional subsidiary-ledger party tag.
    pub party: Option<PartyRef>,
    /// Free-text particulars for this line.
    pub particulars: Option<String>,
}

/// Input for creating a new journal entry.
#[derive(Debug, Clone)]
pub struct CreateJournalEntryInput {
    /// The branch this entry belongs to.
    pub branch_id: Uuid,
    /// The journal book classification.
    pub journal_type: JournalType,
    /// The entry date (calendar date, no time component).
    pub entry_date: NaiveDate,
    /// A description of the entry.
    pub description: String,
    /// Optional free-text reference (e.g. invoice number).
    pub reference_no: Option<String>,
    /// The journal lines (must have at least 2).
    pub lines: Vec<JournalLineInput>,
    /// The user creating the entry (the maker).
    pub created_by: Uuid,
}

/// Derived debit/credit totals for an entry, rounded to 2 decimals.
#[derive(Debug, Clone, Copy)]
pub struct EntryTotals {
    /// Total debit amount.
    pub total_debit: Decimal,
    /// Total credit amount.
    pub total_credit: Decimal,
    /// Whether the entry is balanced (debits == credits).
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates entry totals from rounded debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}
