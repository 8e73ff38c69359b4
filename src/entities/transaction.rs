//! Transaction entity - An open parking session in the active set.
//!
//! A row exists from vehicle entry until the session is either closed (moved
//! into `history`) or deleted outright. Only `owner_name`, `plate_number` and
//! `parking_slot` are required at creation, but every text column is nullable
//! so that databases written by earlier deployments remain readable.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Active transaction database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Store-assigned, monotonically increasing identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the vehicle owner
    #[sea_orm(column_type = "Text", nullable)]
    pub owner_name: Option<String>,
    /// Free-text vehicle description (e.g. "Civic")
    #[sea_orm(column_type = "Text", nullable)]
    pub vehicle_name: Option<String>,
    /// Free-text vehicle category (e.g. "car", "motorcycle")
    #[sea_orm(column_type = "Text", nullable)]
    pub vehicle_type: Option<String>,
    /// Licence plate
    #[sea_orm(column_type = "Text", nullable)]
    pub plate_number: Option<String>,
    /// Caller-supplied entry timestamp, stored as given
    #[sea_orm(column_type = "Text", nullable)]
    pub entry_time: Option<String>,
    /// Caller-supplied exit timestamp; `None` while the session is open
    #[sea_orm(column_type = "Text", nullable)]
    pub exit_time: Option<String>,
    /// Slot identifier the vehicle occupies
    #[sea_orm(column_type = "Text", nullable)]
    pub parking_slot: Option<String>,
}

/// Active transactions are not related to other tables
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
