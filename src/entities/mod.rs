//! Entity module - Contains the SeaORM entity definitions for the ledger.
//! `transactions` holds open sessions, `history` holds closed ones.
//! Both tables share the same column layout.

pub mod history;
pub mod transaction;

// Re-export specific types to avoid conflicts
pub use history::{Column as HistoryColumn, Entity as History, Model as HistoryModel};
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, Model as TransactionModel,
};
