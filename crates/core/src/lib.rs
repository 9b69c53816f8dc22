//! Core posting engine for Saldo.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and balance
//! calculations live here.
//!
//! # Modules
//!
//! - `journal` - Journal entry aggregate, validation, control numbers
//! - `posting` - Posting state machine and reversal construction
//! - `ledger` - Running-balance projection arithmetic
//! - `reports` - Financial report assembly

pub mod journal;
pub mod ledger;
pub mod posting;
pub mod reports;
