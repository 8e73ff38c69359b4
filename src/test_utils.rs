//! Shared test utilities for the parking ledger.
//!
//! Provides helpers for setting up an in-memory database and recording
//! vehicle entries with sensible defaults.

use crate::{
    core::transaction::{self, NewTransaction},
    entities,
    errors::Result,
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with the schema initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::ensure_schema(&db).await?;
    Ok(db)
}

/// Builds an entry request with only the required fields set.
pub fn entry(owner_name: &str, plate_number: &str, parking_slot: &str) -> NewTransaction {
    NewTransaction {
        owner_name: Some(owner_name.to_string()),
        plate_number: Some(plate_number.to_string()),
        parking_slot: Some(parking_slot.to_string()),
        ..Default::default()
    }
}

/// Records an open transaction for `parking_slot`.
///
/// # Defaults
/// * `owner_name`: `"Test Owner"`
/// * `plate_number`: `"TEST-<slot>"`
/// * `entry_time`: `"2024-01-01T08:00"`
pub async fn create_test_transaction(
    db: &DatabaseConnection,
    parking_slot: &str,
) -> Result<entities::transaction::Model> {
    let input = NewTransaction {
        entry_time: Some("2024-01-01T08:00".to_string()),
        ..entry("Test Owner", &format!("TEST-{parking_slot}"), parking_slot)
    };
    transaction::create_transaction(db, input).await
}

/// Counts the closed sessions, for asserting on the close transition.
pub async fn count_history(db: &DatabaseConnection) -> Result<u64> {
    entities::History::find()
        .count(db)
        .await
        .map_err(Into::into)
}
