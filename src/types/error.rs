//! Error types for the bank ledger
//!
//! This module defines all error kinds that can occur during ledger
//! operations. Errors are local to a single operation and are reported to
//! the immediate caller; nothing is retried automatically and no error
//! escalates to a process-fatal condition.
//!
//! # Error Categories
//!
//! - **Lookup errors**: unknown account number, record position out of range
//! - **State errors**: operating on a closed account, closing twice
//! - **Validation errors**: non-positive amounts, unknown account types
//! - **Storage errors**: inaccessible record file, undecodable record bytes
//! - **Reconciliation errors**: a transfer that debited but failed to credit
//!
//! `StoreUnavailable` and `PartialTransfer` are the only kinds that can
//! leave persisted state requiring human reconciliation.

use crate::types::account::{AccountNumber, Position};
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for ledger operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Unknown account number or record position
    #[error("{entity} not found")]
    NotFound {
        /// Description of what was looked up ("account 1001", "record at position 3")
        entity: String,
    },

    /// Balance-affecting operation attempted on a closed account
    #[error("account {number} is closed")]
    AccountClosed {
        /// The closed account's number
        number: AccountNumber,
    },

    /// Close attempted on an account that is already closed
    ///
    /// Closed is a terminal state; the second close is rejected and the
    /// stored record is left untouched.
    #[error("account {number} is already closed")]
    AlreadyClosed {
        /// The account's number
        number: AccountNumber,
    },

    /// Amount is non-positive or not representable
    #[error("invalid amount: {amount}")]
    InvalidAmount {
        /// The offending amount
        amount: Decimal,
    },

    /// Savings floor violated
    ///
    /// Savings balances never go negative; the withdrawal or transfer-out
    /// is rejected and the account state remains unchanged.
    #[error("insufficient funds in account {number}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// The Savings account's number
        number: AccountNumber,
        /// Balance before the rejected operation
        balance: Decimal,
        /// Requested debit amount
        requested: Decimal,
    },

    /// Account type string does not name a known kind
    #[error("invalid account type '{value}' (expected Savings or Current)")]
    InvalidAccountType {
        /// The unrecognized input
        value: String,
    },

    /// The record store medium cannot be opened or written
    #[error("record store unavailable: {message}")]
    StoreUnavailable {
        /// Description of the underlying I/O failure
        message: String,
    },

    /// Transfer debited the source but failed to credit the destination
    ///
    /// There is no automatic rollback; the ledger is left inconsistent and
    /// requires manual reconciliation.
    #[error(
        "transfer of {amount} from {from} to {to} partially applied: source debited, destination not credited"
    )]
    PartialTransfer {
        /// Source account number
        from: AccountNumber,
        /// Destination account number
        to: AccountNumber,
        /// Transfer amount
        amount: Decimal,
    },

    /// Stored record bytes could not be decoded
    #[error("corrupt record at position {position}: {message}")]
    CorruptRecord {
        /// Record slot the bytes were read from
        position: Position,
        /// Description of the decode failure
        message: String,
    },

    /// Transfer source and destination are the same account
    #[error("cannot transfer from account {number} to itself")]
    SameAccount {
        /// The account number given for both sides
        number: AccountNumber,
    },
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::StoreUnavailable {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LedgerError (export adapter)
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        LedgerError::StoreUnavailable {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create a NotFound error for an unknown account number
    pub fn not_found_account(number: AccountNumber) -> Self {
        LedgerError::NotFound {
            entity: format!("account {}", number),
        }
    }

    /// Create a NotFound error for a record position past end-of-file
    pub fn not_found_position(position: Position) -> Self {
        LedgerError::NotFound {
            entity: format!("record at position {}", position),
        }
    }

    /// Create an AccountClosed error
    pub fn account_closed(number: AccountNumber) -> Self {
        LedgerError::AccountClosed { number }
    }

    /// Create an AlreadyClosed error
    pub fn already_closed(number: AccountNumber) -> Self {
        LedgerError::AlreadyClosed { number }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        LedgerError::InvalidAmount { amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(
        number: AccountNumber,
        balance: Decimal,
        requested: Decimal,
    ) -> Self {
        LedgerError::InsufficientFunds {
            number,
            balance,
            requested,
        }
    }

    /// Create an InvalidAccountType error
    pub fn invalid_account_type(value: &str) -> Self {
        LedgerError::InvalidAccountType {
            value: value.to_string(),
        }
    }

    /// Create a StoreUnavailable error
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        LedgerError::StoreUnavailable {
            message: message.into(),
        }
    }

    /// Create a PartialTransfer error
    pub fn partial_transfer(from: AccountNumber, to: AccountNumber, amount: Decimal) -> Self {
        LedgerError::PartialTransfer { from, to, amount }
    }

    /// Create a CorruptRecord error
    pub fn corrupt_record(position: Position, message: impl Into<String>) -> Self {
        LedgerError::CorruptRecord {
            position,
            message: message.into(),
        }
    }

    /// Create a SameAccount error
    pub fn same_account(number: AccountNumber) -> Self {
        LedgerError::SameAccount { number }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::not_found(
        LedgerError::not_found_account(1001),
        "account 1001 not found"
    )]
    #[case::not_found_position(
        LedgerError::not_found_position(3),
        "record at position 3 not found"
    )]
    #[case::account_closed(
        LedgerError::account_closed(1002),
        "account 1002 is closed"
    )]
    #[case::already_closed(
        LedgerError::already_closed(1002),
        "account 1002 is already closed"
    )]
    #[case::invalid_amount(
        LedgerError::invalid_amount(Decimal::new(-500, 2)),
        "invalid amount: -5.00"
    )]
    #[case::insufficient_funds(
        LedgerError::insufficient_funds(1001, Decimal::new(10000, 2), Decimal::new(20000, 2)),
        "insufficient funds in account 1001: balance 100.00, requested 200.00"
    )]
    #[case::invalid_account_type(
        LedgerError::invalid_account_type("checking"),
        "invalid account type 'checking' (expected Savings or Current)"
    )]
    #[case::store_unavailable(
        LedgerError::store_unavailable("permission denied"),
        "record store unavailable: permission denied"
    )]
    #[case::partial_transfer(
        LedgerError::partial_transfer(1001, 1002, Decimal::new(3000, 2)),
        "transfer of 30.00 from 1001 to 1002 partially applied: source debited, destination not credited"
    )]
    #[case::corrupt_record(
        LedgerError::corrupt_record(7, "unknown account type tag 9"),
        "corrupt record at position 7: unknown account type tag 9"
    )]
    #[case::same_account(
        LedgerError::same_account(1001),
        "cannot transfer from account 1001 to itself"
    )]
    fn error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn io_error_converts_to_store_unavailable() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let error: LedgerError = io_error.into();
        assert!(matches!(error, LedgerError::StoreUnavailable { .. }));
        assert_eq!(
            error.to_string(),
            "record store unavailable: permission denied"
        );
    }
}
