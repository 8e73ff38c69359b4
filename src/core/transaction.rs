//! Transaction business logic - The active side of the parking ledger.
//!
//! This module records vehicle entries, enforces that a parking slot holds at most
//! one open transaction, and performs the close transition that moves a finished
//! session into `history`. Every function takes the database handle explicitly so
//! callers can pass a live pool or a `MockDatabase` connection.
//!
//! Slot occupancy is checked up front for a clean error, and backed by the
//! `idx_transactions_open_slot` partial unique index so that two concurrent
//! entries for the same slot cannot both succeed.

use crate::{
    entities::{Transaction, history, transaction},
    errors::{Error, Result},
};
use sea_orm::{DbErr, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::{debug, info};

/// Input for recording a vehicle entry.
///
/// All fields are optional at the type level so that missing and empty values
/// are reported through the same validation error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewTransaction {
    /// Required
    pub owner_name: Option<String>,
    pub vehicle_name: Option<String>,
    pub vehicle_type: Option<String>,
    /// Required
    pub plate_number: Option<String>,
    pub entry_time: Option<String>,
    pub exit_time: Option<String>,
    /// Required
    pub parking_slot: Option<String>,
}

impl NewTransaction {
    /// Checks the required fields and returns the requested slot.
    pub fn validate(&self) -> Result<&str> {
        if !is_present(self.owner_name.as_deref()) || !is_present(self.plate_number.as_deref()) {
            return Err(Error::Validation {
                message: "owner_name and plate_number are required".to_string(),
            });
        }
        match self.parking_slot.as_deref() {
            Some(slot) if is_present(Some(slot)) => Ok(slot),
            _ => Err(Error::Validation {
                message: "parking_slot is required".to_string(),
            }),
        }
    }
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Result of [`update_transaction`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The session was closed; carries the new history row
    MovedToHistory(history::Model),
    /// The session stays open; carries the updated active row
    Updated(transaction::Model),
}

/// Maps a lost race on the open-slot index to the same error the pre-check raises.
fn slot_conflict(err: DbErr, slot: &str) -> Error {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
        Error::SlotOccupied {
            slot: slot.to_string(),
        }
    } else {
        Error::Database(err)
    }
}

/// Copies an active row into a new history row with the given exit time.
fn closed_copy(row: &transaction::Model, exit_time: String) -> history::ActiveModel {
    history::ActiveModel {
        owner_name: Set(row.owner_name.clone()),
        vehicle_name: Set(row.vehicle_name.clone()),
        vehicle_type: Set(row.vehicle_type.clone()),
        plate_number: Set(row.plate_number.clone()),
        entry_time: Set(row.entry_time.clone()),
        exit_time: Set(Some(exit_time)),
        parking_slot: Set(row.parking_slot.clone()),
        ..Default::default()
    }
}

/// Retrieves every active transaction, most recently created first.
pub async fn list_transactions(db: &DatabaseConnection) -> Result<Vec<transaction::Model>> {
    Transaction::find()
        .order_by_desc(transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific active transaction by id, or `None` if it does not exist.
pub async fn get_transaction_by_id(
    db: &DatabaseConnection,
    transaction_id: i64,
) -> Result<Option<transaction::Model>> {
    Transaction::find_by_id(transaction_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Records a vehicle entry as a new open transaction.
///
/// Fails with [`Error::Validation`] when a required field is missing or empty and
/// with [`Error::SlotOccupied`] when the slot already has an open transaction. In
/// both cases nothing is written.
pub async fn create_transaction(
    db: &DatabaseConnection,
    input: NewTransaction,
) -> Result<transaction::Model> {
    let slot = input.validate()?.to_string();

    let occupant = Transaction::find()
        .filter(transaction::Column::ParkingSlot.eq(slot.as_str()))
        .filter(transaction::Column::ExitTime.is_null())
        .one(db)
        .await?;
    if let Some(occupant) = occupant {
        debug!(slot = %slot, occupant_id = occupant.id, "Slot already occupied");
        return Err(Error::SlotOccupied { slot });
    }

    let created = transaction::ActiveModel {
        owner_name: Set(input.owner_name),
        vehicle_name: Set(input.vehicle_name),
        vehicle_type: Set(input.vehicle_type),
        plate_number: Set(input.plate_number),
        entry_time: Set(input.entry_time),
        exit_time: Set(input.exit_time.filter(|value| !value.is_empty())),
        parking_slot: Set(Some(slot.clone())),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| slot_conflict(e, &slot))?;

    info!(transaction_id = created.id, slot = %slot, "Created transaction");
    Ok(created)
}

/// Sets the exit time of an active transaction.
///
/// A non-empty `exit_time` closes the session: the row is copied into `history`
/// with that exit time and removed from `transactions`, both inside one database
/// transaction. A null or empty value clears `exit_time` in place and leaves the
/// session open.
pub async fn update_transaction(
    db: &DatabaseConnection,
    transaction_id: i64,
    exit_time: Option<String>,
) -> Result<UpdateOutcome> {
    let exit_time = exit_time.filter(|value| !value.is_empty());

    let txn = db.begin().await?;

    let existing = Transaction::find_by_id(transaction_id)
        .one(&txn)
        .await?
        .ok_or(Error::TransactionNotFound { id: transaction_id })?;

    let outcome = if let Some(exit_time) = exit_time {
        let record = closed_copy(&existing, exit_time).insert(&txn).await?;
        Transaction::delete_by_id(transaction_id).exec(&txn).await?;
        info!(
            transaction_id,
            history_id = record.id,
            "Moved transaction to history"
        );
        UpdateOutcome::MovedToHistory(record)
    } else {
        let slot = existing.parking_slot.clone().unwrap_or_default();
        let mut active: transaction::ActiveModel = existing.into();
        active.exit_time = Set(None);
        let updated = active
            .update(&txn)
            .await
            .map_err(|e| slot_conflict(e, &slot))?;
        info!(transaction_id, "Updated transaction");
        UpdateOutcome::Updated(updated)
    };

    txn.commit().await?;
    Ok(outcome)
}

/// Removes an active transaction without archiving it.
///
/// Deleting an id that does not exist is not an error. Returns the number of rows
/// removed (0 or 1).
pub async fn delete_transaction(db: &DatabaseConnection, transaction_id: i64) -> Result<u64> {
    let result = Transaction::delete_by_id(transaction_id).exec(db).await?;
    info!(
        transaction_id,
        rows_affected = result.rows_affected,
        "Deleted transaction"
    );
    Ok(result.rows_affected)
}

/// Lists the slots currently held by open transactions, in creation order.
pub async fn get_occupied_slots(db: &DatabaseConnection) -> Result<Vec<String>> {
    Transaction::find()
        .select_only()
        .column(transaction::Column::ParkingSlot)
        .filter(transaction::Column::ExitTime.is_null())
        .filter(transaction::Column::ParkingSlot.is_not_null())
        .order_by_asc(transaction::Column::Id)
        .into_tuple::<String>()
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_transaction_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let missing_owner = NewTransaction {
            plate_number: Some("ABC123".to_string()),
            parking_slot: Some("A1".to_string()),
            ..Default::default()
        };
        let result = create_transaction(&db, missing_owner).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message } if message == "owner_name and plate_number are required"
        ));

        let empty_plate = NewTransaction {
            owner_name: Some("Ann".to_string()),
            plate_number: Some(String::new()),
            parking_slot: Some("A1".to_string()),
            ..Default::default()
        };
        let result = create_transaction(&db, empty_plate).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let missing_slot = NewTransaction {
            owner_name: Some("Ann".to_string()),
            plate_number: Some("ABC123".to_string()),
            ..Default::default()
        };
        let result = create_transaction(&db, missing_slot).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message } if message == "parking_slot is required"
        ));

        // Validation happens before any statement reaches the store
        assert!(db.into_transaction_log().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_transaction_slot_occupied_mock() -> Result<()> {
        let occupant = transaction::Model {
            id: 7,
            owner_name: Some("Bob".to_string()),
            vehicle_name: None,
            vehicle_type: None,
            plate_number: Some("XYZ789".to_string()),
            entry_time: None,
            exit_time: None,
            parking_slot: Some("A1".to_string()),
        };
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![occupant]])
            .into_connection();

        let result = create_transaction(&db, entry("Ann", "ABC123", "A1")).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::SlotOccupied { slot } if slot == "A1"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_transaction_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let input = NewTransaction {
            owner_name: Some("Ann".to_string()),
            vehicle_name: Some("Civic".to_string()),
            vehicle_type: Some("car".to_string()),
            plate_number: Some("ABC123".to_string()),
            entry_time: Some("2024-01-01T08:00".to_string()),
            exit_time: None,
            parking_slot: Some("A1".to_string()),
        };
        let created = create_transaction(&db, input).await?;

        assert_eq!(created.id, 1);
        assert_eq!(created.owner_name.as_deref(), Some("Ann"));
        assert_eq!(created.vehicle_name.as_deref(), Some("Civic"));
        assert_eq!(created.entry_time.as_deref(), Some("2024-01-01T08:00"));
        assert_eq!(created.exit_time, None);

        let stored = get_transaction_by_id(&db, created.id).await?.unwrap();
        assert_eq!(stored, created);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_transactions_newest_first() -> Result<()> {
        let db = setup_test_db().await?;

        let first = create_test_transaction(&db, "A1").await?;
        let second = create_test_transaction(&db, "A2").await?;
        let third = create_test_transaction(&db, "B1").await?;

        let listed = list_transactions(&db).await?;
        assert_eq!(listed, vec![third, second, first]);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_transactions_empty() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(list_transactions(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_transaction_slot_occupied_leaves_store_unchanged() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_transaction(&db, "A1").await?;

        let result = create_transaction(&db, entry("Bob", "XYZ789", "A1")).await;
        assert!(matches!(result.unwrap_err(), Error::SlotOccupied { .. }));
        assert_eq!(list_transactions(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_slot_reusable_after_close() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_transaction(&db, "A1").await?;

        update_transaction(&db, first.id, Some("2024-01-01T10:00".to_string())).await?;
        let second = create_transaction(&db, entry("Bob", "XYZ789", "A1")).await?;

        assert_eq!(get_occupied_slots(&db).await?, vec!["A1".to_string()]);
        assert_ne!(second.id, first.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_slot_conflict_maps_unique_violation() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_transaction(&db, "A1").await?;

        // Simulates losing the race: the pre-check is bypassed and the index fires
        let err = transaction::ActiveModel {
            owner_name: Set(Some("Bob".to_string())),
            plate_number: Set(Some("XYZ789".to_string())),
            parking_slot: Set(Some("A1".to_string())),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap_err();

        assert!(matches!(
            slot_conflict(err, "A1"),
            Error::SlotOccupied { slot } if slot == "A1"
        ));
        assert!(matches!(
            slot_conflict(DbErr::Custom("boom".to_string()), "A1"),
            Error::Database(_)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_transaction_moves_to_history() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_transaction(&db, "A1").await?;
        let other = create_test_transaction(&db, "A2").await?;

        let outcome =
            update_transaction(&db, created.id, Some("2024-01-01T10:00".to_string())).await?;

        let UpdateOutcome::MovedToHistory(record) = outcome else {
            panic!("expected the transaction to be closed");
        };
        assert_eq!(record.plate_number, created.plate_number);
        assert_eq!(record.owner_name, created.owner_name);
        assert_eq!(record.parking_slot, created.parking_slot);
        assert_eq!(record.exit_time.as_deref(), Some("2024-01-01T10:00"));

        assert_eq!(list_transactions(&db).await?, vec![other]);
        assert_eq!(count_history(&db).await?, 1);
        assert_eq!(get_occupied_slots(&db).await?, vec!["A2".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_transaction_rolls_back_when_history_insert_fails() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_transaction(&db, "A1").await?;

        db.execute_unprepared("DROP TABLE history").await?;

        let result =
            update_transaction(&db, created.id, Some("2024-01-01T10:00".to_string())).await;
        assert!(matches!(result.unwrap_err(), Error::Database(_)));

        assert_eq!(list_transactions(&db).await?, vec![created]);
        assert_eq!(get_occupied_slots(&db).await?, vec!["A1".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_transaction_without_exit_time_stays_open() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_transaction(&db, "A1").await?;

        for exit_time in [None, Some(String::new())] {
            let outcome = update_transaction(&db, created.id, exit_time).await?;
            assert_eq!(outcome, UpdateOutcome::Updated(created.clone()));
        }

        assert_eq!(list_transactions(&db).await?, vec![created]);
        assert_eq!(count_history(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_transaction_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_transaction(&db, "A1").await?;

        let result = update_transaction(&db, 999, Some("2024-01-01T10:00".to_string())).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::TransactionNotFound { id: 999 }
        ));

        assert_eq!(list_transactions(&db).await?, vec![created]);
        assert_eq!(count_history(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_transaction() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_transaction(&db, "A1").await?;

        assert_eq!(delete_transaction(&db, created.id).await?, 1);
        assert!(list_transactions(&db).await?.is_empty());
        assert!(get_occupied_slots(&db).await?.is_empty());
        assert_eq!(count_history(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_transaction_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let closed = create_test_transaction(&db, "A1").await?;
        update_transaction(&db, closed.id, Some("2024-01-01T10:00".to_string())).await?;

        assert_eq!(delete_transaction(&db, 999).await?, 0);
        assert_eq!(delete_transaction(&db, closed.id).await?, 0);
        assert_eq!(count_history(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_occupied_slots_skips_closed_rows() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_transaction(&db, "A1").await?;
        create_transaction(
            &db,
            NewTransaction {
                exit_time: Some("2024-01-01T10:00".to_string()),
                ..entry("Bob", "XYZ789", "B2")
            },
        )
        .await?;
        create_test_transaction(&db, "C3").await?;

        assert_eq!(
            get_occupied_slots(&db).await?,
            vec!["A1".to_string(), "C3".to_string()]
        );
        Ok(())
    }
}
