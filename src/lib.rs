//! Bank Ledger Library
//! # Overview
//!
//! This library implements a record-oriented account ledger: fixed-schema
//! account records persisted to a flat file, mutated through
//! position-addressed reads and writes, with an append-only side log for
//! transaction history.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, LogEntry, errors)
//! - [`config`] - File locations and injected admin credentials
//! - [`cli`] - CLI argument parsing and command dispatch
//! - [`core`] - Record storage and mutation layer:
//!   - [`core::record_store`] - Fixed-width record file with position-addressed access
//!   - [`core::account_index`] - Account number lookup and assignment
//!   - [`core::transaction_log`] - Append-only transaction history
//!   - [`core::ledger`] - Account operations engine
//! - [`io`] - On-disk record format, CSV export, backup/restore
//!
//! # Operations
//!
//! The ledger supports five single-account operations and two multi-account
//! operations:
//!
//! - **Create**: assign the next account number and append a record
//! - **Deposit** / **Withdraw**: read-validate-mutate-write on one record;
//!   Savings balances never go negative
//! - **Modify**: update contact fields and/or account type in place
//! - **Close**: terminal state change; the record and its number live on
//! - **Transfer**: two-account mutation, source persisted first, with a
//!   documented partial-failure mode and no automatic rollback
//! - **Interest**: bulk scan-mutate-rewrite crediting every active Savings
//!   account with one month of an annual rate
//!
//! Every operation appends a line to the transaction log; appends are
//! best-effort and never fail the triggering operation.

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{
    AccountUpdate, CreateRequest, InterestSummary, Ledger, RecordStore, SortKey, TransactionLog,
    TransferReceipt,
};
pub use crate::types::{
    Account, AccountKind, AccountNumber, LedgerError, LogEntry, Position, TxKind,
};
