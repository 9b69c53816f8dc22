//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//! - Post-commit event dispatch

pub mod entities;
pub mod events;
pub mod migration;
pub mod repositories;

pub use repositories::{
    AccountRepository, JournalEntryRepository, LedgerRepository, PostingRepository,
    ReportRepository,
};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use saldo_shared::config::DatabaseConfig;

/// Establishes a connection pool from the application config.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(&config.url);
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(false);
    Database::connect(options).await
}

/// Establishes a connection from a bare database URL.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_url(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
