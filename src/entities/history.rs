//! History entity - A closed parking session.
//!
//! Rows are only ever inserted by the close transition and are never updated
//! afterwards. Ids form their own sequence, independent of `transactions`.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Closed session database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "history")]
pub struct Model {
    /// Identifier within the history sequence
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub owner_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub vehicle_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub vehicle_type: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub plate_number: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub entry_time: Option<String>,
    /// Exit timestamp supplied when the session was closed
    #[sea_orm(column_type = "Text", nullable)]
    pub exit_time: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub parking_slot: Option<String>,
}

/// History has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
