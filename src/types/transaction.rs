//! Transaction log entry types
//!
//! This module defines the event kinds recorded in the transaction log and
//! the parsed representation of a single log line. Entries are append-only
//! history: they are never mutated or deleted, and file order is
//! chronological order.

use crate::types::account::AccountNumber;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Timestamp format used on every log line (local time)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Kind of a logged ledger event
///
/// `TransferOut`/`TransferIn` are emitted as a pair, source first, and only
/// when the whole transfer persisted. `Interest` is emitted once per credited
/// Savings account during a bulk interest pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Create,
    Deposit,
    Withdraw,
    Close,
    TransferOut,
    TransferIn,
    Interest,
}

impl TxKind {
    /// Wire name as written to the transaction log
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Create => "CREATE",
            TxKind::Deposit => "DEPOSIT",
            TxKind::Withdraw => "WITHDRAW",
            TxKind::Close => "CLOSE",
            TxKind::TransferOut => "TRANSFER_OUT",
            TxKind::TransferIn => "TRANSFER_IN",
            TxKind::Interest => "INTEREST",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(TxKind::Create),
            "DEPOSIT" => Ok(TxKind::Deposit),
            "WITHDRAW" => Ok(TxKind::Withdraw),
            "CLOSE" => Ok(TxKind::Close),
            "TRANSFER_OUT" => Ok(TxKind::TransferOut),
            "TRANSFER_IN" => Ok(TxKind::TransferIn),
            "INTEREST" => Ok(TxKind::Interest),
            _ => Err(()),
        }
    }
}

/// One parsed transaction log line
///
/// Line format: `number, KIND, amount, resulting_balance, timestamp` with
/// amounts at two decimal places and the timestamp in
/// [`TIMESTAMP_FORMAT`] local time. Entries relate to accounts by account
/// number, not by record position, so history survives independently of
/// storage layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub number: AccountNumber,
    pub kind: TxKind,
    pub amount: Decimal,
    pub resulting_balance: Decimal,
    pub timestamp: NaiveDateTime,
}

impl LogEntry {
    /// Render this entry as a single log line (no trailing newline)
    pub fn to_line(&self) -> String {
        format!(
            "{}, {}, {:.2}, {:.2}, {}",
            self.number,
            self.kind,
            self.amount,
            self.resulting_balance,
            self.timestamp.format(TIMESTAMP_FORMAT)
        )
    }

    /// Parse one log line
    ///
    /// Returns `None` for lines that do not match the expected format;
    /// readers skip such lines rather than failing the whole scan.
    pub fn parse(line: &str) -> Option<LogEntry> {
        let mut parts = line.splitn(5, ',').map(str::trim);

        let number = parts.next()?.parse().ok()?;
        let kind = parts.next()?.parse().ok()?;
        let amount = parts.next()?.parse().ok()?;
        let resulting_balance = parts.next()?.parse().ok()?;
        let timestamp = NaiveDateTime::parse_from_str(parts.next()?, TIMESTAMP_FORMAT).ok()?;

        Some(LogEntry {
            number,
            kind,
            amount,
            resulting_balance,
            timestamp,
        })
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}
