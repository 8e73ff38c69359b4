//! Database configuration module for the parking ledger.
//!
//! Handles the `SQLite` connection and idempotent schema creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the on-disk layout always matches the
//! Rust models. The open-slot uniqueness index is not expressible through the
//! entity macros and is issued as raw SQL.

use crate::entities::{History, Transaction};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info, instrument};

/// Default storage location, created on first connect.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://parking.db?mode=rwc";

/// At most one row per slot may have a null `exit_time`.
const OPEN_SLOT_INDEX_SQL: &str = "CREATE UNIQUE INDEX IF NOT EXISTS idx_transactions_open_slot \
     ON transactions(parking_slot) WHERE exit_time IS NULL";

/// Opens a connection pool to the given database URL.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the `transactions` and `history` tables and the open-slot index if absent.
///
/// Safe to call on every start; existing rows are never touched.
#[instrument(skip(db))]
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut transaction_table = schema.create_table_from_entity(Transaction);
    transaction_table.if_not_exists();
    let mut history_table = schema.create_table_from_entity(History);
    history_table.if_not_exists();

    db.execute(builder.build(&transaction_table)).await?;
    db.execute(builder.build(&history_table)).await?;
    db.execute_unprepared(OPEN_SLOT_INDEX_SQL).await?;

    info!("Database tables ensured");
    Ok(())
}
