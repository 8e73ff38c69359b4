//! Request handlers, grouped by resource.

/// Health check
pub mod general;
/// Closed-session listing
pub mod history;
/// Slot occupancy
pub mod parking;
/// Active transaction CRUD and the close transition
pub mod transaction;

use serde::{Deserialize, Serialize};

/// JSON body for operations that only report a status message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Confirmation text
    pub message: String,
}

impl MessageResponse {
    /// Wraps a confirmation message.
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
