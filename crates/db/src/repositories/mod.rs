//! Store implementations backed by PostgreSQL.
//!
//! `SeaOrmStore` implements every read-only store trait the report engine
//! needs; each trait lives in its own module.

pub mod account;
pub mod budget;
pub mod fiscal;
pub mod ledger;

use ledgerview_core::store::StoreError;
use sea_orm::{DatabaseConnection, DbErr};
use tracing::error;

/// Report store over a `SeaORM` connection.
#[derive(Debug, Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    /// Creates a new store.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// Logs a database failure and wraps it as a backend error.
pub(crate) fn db_err(err: DbErr) -> StoreError {
    error!(error = %err, "Database query failed");
    StoreError::Backend(err.to_string())
}
