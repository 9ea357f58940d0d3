//! CSV export adapter
//!
//! Serializes the full record store snapshot, closed accounts included,
//! to delimited text, one row per record. A pure read-only consumer of the
//! record store.

use crate::core::record_store::RecordStore;
use crate::types::{Account, LedgerError};
use serde::Serialize;
use std::io::Write;

/// One exported CSV row
///
/// `active` is rendered as 0/1 and the balance is fixed to two decimal
/// places, matching the stored precision.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    number: u32,
    name: &'a str,
    kind: &'a str,
    balance: String,
    phone: &'a str,
    address: &'a str,
    active: u8,
}

impl<'a> From<&'a Account> for ExportRow<'a> {
    fn from(account: &'a Account) -> Self {
        ExportRow {
            number: account.number,
            name: &account.holder_name,
            kind: account.kind.as_str(),
            balance: format!("{:.2}", account.balance),
            phone: &account.phone,
            address: &account.address,
            active: u8::from(account.active),
        }
    }
}

/// Export every record to CSV and return the number of rows written
///
/// # Errors
///
/// Returns a store error if the snapshot cannot be read, or
/// `StoreUnavailable` if writing the CSV fails.
pub fn export_accounts_csv(
    store: &RecordStore,
    output: &mut dyn Write,
) -> Result<usize, LedgerError> {
    let accounts = store.read_all()?;

    let mut writer = csv::Writer::from_writer(output);
    for account in &accounts {
        writer.serialize(ExportRow::from(account))?;
    }
    writer.flush()?;

    Ok(accounts.len())
}
