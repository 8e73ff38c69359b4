use crate::{api::AppState, core::transaction, errors::Result};
use axum::{Json, extract::State};

/// `GET /api/parking/occupied` - slots held by open transactions.
pub async fn occupied_slots(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let slots = transaction::get_occupied_slots(&state.database).await?;
    Ok(Json(slots))
}
