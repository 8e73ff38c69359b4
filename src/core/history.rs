//! History queries - Read-only access to closed parking sessions.
//!
//! Rows are written exclusively by [`crate::core::transaction::update_transaction`].

use crate::{
    entities::{History, history},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};

/// Retrieves every closed session, most recently archived first.
pub async fn get_history(db: &DatabaseConnection) -> Result<Vec<history::Model>> {
    History::find()
        .order_by_desc(history::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
