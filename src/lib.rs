//! Parking ledger - An HTTP service that tracks parking-lot sessions
//!
//! This crate records vehicle entries, enforces that each parking slot holds at most
//! one open session, archives finished sessions into a history table, and reports
//! which slots are currently occupied.

#![deny(
    unsafe_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    // No panicking shortcuts outside tests; handlers must return errors
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::dbg_macro,
    clippy::clone_on_ref_ptr,
    clippy::match_same_arms,
    clippy::too_many_lines,
    clippy::semicolon_if_nothing_returned,
    rust_2018_idioms,
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
)]

/// HTTP interface - router, handlers, and error rendering
pub mod api;
/// Configuration management for database and server settings
pub mod config;
/// Core business logic - framework-agnostic ledger operations
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;

#[cfg(test)]
pub mod test_utils;
