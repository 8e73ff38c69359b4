//! Core business logic - framework-agnostic parking ledger operations.
//!
//! Functions here receive the database handle as an argument and know nothing
//! about HTTP; the `api` layer maps their results and errors onto responses.

/// Closed-session queries
pub mod history;
/// Active-session operations and the close transition
pub mod transaction;
