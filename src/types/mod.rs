//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account state and identifiers
//! - `transaction`: Transaction log entry types
//! - `error`: Error types for the ledger

pub mod account;
pub mod error;
pub mod transaction;

pub use account::{Account, AccountKind, AccountNumber, Position};
pub use error::LedgerError;
pub use transaction::{LogEntry, TxKind, TIMESTAMP_FORMAT};
