//! Append-only transaction history
//!
//! This module provides the `TransactionLog`, a newline-delimited,
//! comma-separated text stream keyed by account number. Entries are pure
//! history: they are never mutated or deleted, and file order is
//! chronological order.
//!
//! Appending is best-effort by contract: if the log file cannot be opened
//! or written, the event is dropped with a warning and the triggering
//! operation is not failed. The log is history, not a durability mechanism.

use crate::types::{AccountNumber, LogEntry, TxKind};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Append-only, human-readable event stream keyed by account number
#[derive(Debug)]
pub struct TransactionLog {
    path: PathBuf,
}

impl TransactionLog {
    /// Create a log handle for the given file path
    ///
    /// The file itself is created lazily by the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TransactionLog { path: path.into() }
    }

    /// Path of the underlying log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event line
    ///
    /// Best-effort: failures are logged and swallowed, never returned.
    pub fn append(
        &self,
        number: AccountNumber,
        kind: TxKind,
        amount: Decimal,
        resulting_balance: Decimal,
        timestamp: NaiveDateTime,
    ) {
        let entry = LogEntry {
            number,
            kind,
            amount,
            resulting_balance,
            timestamp,
        };

        let mut file = match OpenOptions::new().append(true).create(true).open(&self.path) {
            Ok(file) => file,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "transaction log unavailable, entry dropped"
                );
                return;
            }
        };

        if let Err(e) = writeln!(file, "{}", entry.to_line()) {
            warn!(
                path = %self.path.display(),
                error = %e,
                "failed to write transaction log entry, entry dropped"
            );
        }
    }

    /// First `limit` entries for `number`, in file order
    ///
    /// Scans forward from the start of the log and stops as soon as `limit`
    /// matches are found, so the result is the oldest `limit` entries for
    /// the account. Lines that do not parse are skipped. A missing log file
    /// yields an empty result.
    pub fn recent_for(&self, number: AccountNumber, limit: usize) -> Vec<LogEntry> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(_) => return Vec::new(),
        };

        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let Ok(line) = line else { break };
            if let Some(entry) = LogEntry::parse(&line) {
                if entry.number == number {
                    entries.push(entry);
                    if entries.len() >= limit {
                        break;
                    }
                }
            }
        }

        entries
    }
}
