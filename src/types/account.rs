//! Account-related types for the bank ledger
//!
//! This module defines the Account structure that is persisted to the record
//! store, along with the account kind enumeration and identifier aliases.

use crate::types::error::LedgerError;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Account number
///
/// Positive, unique, and immutable once assigned. Numbers are handed out
/// monotonically starting at 1001 and are never reused, even after an
/// account is closed.
pub type AccountNumber = u32;

/// Record slot index in the record store
///
/// Zero-based and stable for the lifetime of an account: positions are
/// assigned at append time and never renumbered or reused.
pub type Position = u64;

/// Account kind
///
/// Savings accounts enforce a non-negative balance on every
/// withdrawal-class mutation; Current accounts may go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Savings,
    Current,
}

impl AccountKind {
    /// Canonical name as stored and displayed
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Savings => "Savings",
            AccountKind::Current => "Current",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = LedgerError;

    /// Parse an account kind, case-insensitively
    ///
    /// Input is normalized: "savings", "SAVINGS" and "Savings" all parse to
    /// [`AccountKind::Savings`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "savings" => Ok(AccountKind::Savings),
            "current" => Ok(AccountKind::Current),
            _ => Err(LedgerError::invalid_account_type(s)),
        }
    }
}

/// Persisted account state
///
/// This is the unit of storage in the record store. One instance corresponds
/// to exactly one fixed-width record slot on disk. No long-lived in-memory
/// copy is held across operations: every operation re-reads the record it is
/// about to mutate.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Unique account number (> 0)
    pub number: AccountNumber,

    /// Holder name, bounded-length text (truncated at the field width)
    pub holder_name: String,

    /// Account kind (Savings or Current)
    pub kind: AccountKind,

    /// Current balance, fixed-point with 2 decimal places on disk
    pub balance: Decimal,

    /// Contact phone number, bounded-length text
    pub phone: String,

    /// Postal address, bounded-length text
    pub address: String,

    /// Lifecycle state: false means closed
    ///
    /// Closed is terminal. Closed accounts are excluded from
    /// balance-affecting operations but remain in storage permanently;
    /// their record slot is never freed or reused.
    pub active: bool,
}
