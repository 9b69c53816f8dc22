//! `SeaORM` entity definitions.

pub mod accounts;
pub mod audit_logs;
pub mod journal_entries;
pub mod journal_entry_lines;
pub mod ledgers;
