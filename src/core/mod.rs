//! Core business logic module
//!
//! This module contains the record storage and mutation layer:
//! - `record_store` - Fixed-width record file with position-addressed access
//! - `account_index` - Account number lookup and next-number assignment
//! - `transaction_log` - Append-only transaction history
//! - `ledger` - Account operations engine (create, deposit, withdraw, ...)
//!
//! Data flows one direction: the ledger consults the account index to
//! resolve a position, reads through the record store, validates, mutates
//! an in-memory copy, writes back through the record store, then emits to
//! the transaction log. No component depends upward.

pub mod account_index;
pub mod ledger;
pub mod record_store;
pub mod transaction_log;

pub use ledger::{
    AccountUpdate, CreateRequest, InterestSummary, Ledger, SortKey, TransferReceipt,
};
pub use record_store::RecordStore;
pub use transaction_log::TransactionLog;
