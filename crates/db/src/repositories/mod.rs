//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod account;
pub mod journal_entry;
pub mod ledger;
pub mod posting;
pub mod report;

pub use account::{AccountError, AccountRepository, CreateAccountInput, UpdateAccountInput};
pub use journal_entry::{
    JournalEntryError, JournalEntryFilter, JournalEntryRepository, UpdateDraftInput,
};
pub use ledger::{LedgerRepository, LedgerRow};
pub use posting::PostingRepository;
pub use report::{GeneralLedgerBook, ReportRepository, SubsidiaryLedger, SubsidiaryRow};
