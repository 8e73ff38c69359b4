use crate::{api::AppState, core::history, entities, errors::Result};
use axum::{Json, extract::State};

/// `GET /api/history` - closed sessions, newest first.
pub async fn list_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<entities::history::Model>>> {
    let records = history::get_history(&state.database).await?;
    Ok(Json(records))
}
