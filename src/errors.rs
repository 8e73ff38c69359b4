//! Unified error types for the parking ledger.
//!
//! Validation and occupancy errors are raised before any mutation, so a caller
//! receiving one of them can assume the store is unchanged.

use sea_orm::DbErr;
use thiserror::Error;

/// All failures surfaced by the service and HTTP layers.
#[derive(Debug, Error)]
pub enum Error {
    /// A required input field was missing or empty
    #[error("{message}")]
    Validation {
        /// Human-readable description of the missing field(s)
        message: String,
    },

    /// Another open transaction already holds the requested slot
    #[error("Parking slot already occupied.")]
    SlotOccupied {
        /// The contested parking slot
        slot: String,
    },

    /// No active transaction exists with the given id
    #[error("Transaction not found")]
    TransactionNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// The request body was absent or not valid JSON for the endpoint
    #[error("Invalid JSON body")]
    InvalidBody,

    /// A path parameter could not be parsed (e.g. a non-integer id)
    #[error("{message}")]
    InvalidPath {
        /// Description of the rejected parameter
        message: String,
    },

    /// Underlying storage failure, reported verbatim
    #[error("{0}")]
    Database(#[from] DbErr),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Details about the configuration problem
        message: String,
    },

    /// I/O failure while starting or running the server
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
