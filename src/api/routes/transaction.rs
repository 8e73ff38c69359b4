//! Handlers for `/api/transactions`.
//!
//! Bodies and path ids are extracted as `Result<_, Rejection>` so that malformed
//! input is reported in the same `{"error": ...}` shape as every other failure.

use crate::{
    api::{AppState, routes::MessageResponse},
    core::transaction::{self, NewTransaction, UpdateOutcome},
    entities,
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Body of `PUT /api/transactions/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdateTransactionRequest {
    /// Non-empty value closes the session
    pub exit_time: Option<String>,
}

fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        debug!(%rejection, "Rejected request body");
        Error::InvalidBody
    })
}

/// An entry body must be a JSON object with at least one field.
fn entry_body(payload: std::result::Result<Json<Value>, JsonRejection>) -> Result<NewTransaction> {
    let value = json_body(payload)?;
    if !value.as_object().is_some_and(|fields| !fields.is_empty()) {
        debug!("Rejected empty entry body");
        return Err(Error::InvalidBody);
    }
    serde_json::from_value(value).map_err(|e| {
        debug!(error = %e, "Entry body has unexpected field types");
        Error::InvalidBody
    })
}

fn path_id(path: std::result::Result<Path<i64>, PathRejection>) -> Result<i64> {
    path.map(|Path(id)| id).map_err(|rejection| Error::InvalidPath {
        message: rejection.body_text(),
    })
}

/// `GET /api/transactions`
pub async fn list_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<entities::transaction::Model>>> {
    let rows = transaction::list_transactions(&state.database).await?;
    Ok(Json(rows))
}

/// `POST /api/transactions` - records a vehicle entry, 201 on success.
pub async fn create_transaction(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<entities::transaction::Model>)> {
    let input = entry_body(payload)?;
    let created = transaction::create_transaction(&state.database, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/transactions/{id}` - sets the exit time, closing the session when non-empty.
pub async fn update_transaction(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<UpdateTransactionRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let transaction_id = path_id(path)?;
    let request = json_body(payload)?;
    let outcome =
        transaction::update_transaction(&state.database, transaction_id, request.exit_time)
            .await?;
    let message = match outcome {
        UpdateOutcome::MovedToHistory(_) => "Transaction moved to history",
        UpdateOutcome::Updated(_) => "Transaction updated",
    };
    Ok(Json(MessageResponse::new(message)))
}

/// `DELETE /api/transactions/{id}` - succeeds whether or not the row existed.
pub async fn delete_transaction(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>> {
    let transaction_id = path_id(path)?;
    transaction::delete_transaction(&state.database, transaction_id).await?;
    Ok(Json(MessageResponse::new("Transaction deleted")))
}
