//! HTTP rendering of [`Error`].
//!
//! Every failure is returned as `{"error": <message>}` with a status derived
//! from the error kind.

use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure message
    pub error: String,
}

impl Error {
    /// Status code reported to HTTP clients for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. }
            | Self::SlotOccupied { .. }
            | Self::InvalidBody
            | Self::InvalidPath { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::TransactionNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Config { .. } | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "Request rejected");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
