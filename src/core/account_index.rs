//! Account number lookup and assignment
//!
//! Linear scans over the record store. There is no index structure on
//! purpose: the store is small, single-writer, and correctness rather than
//! throughput is the contract here.

use crate::core::record_store::RecordStore;
use crate::types::{AccountNumber, LedgerError, Position};

/// First account number handed out on an empty store
pub const FIRST_ACCOUNT_NUMBER: AccountNumber = 1001;

/// Next unused account number
///
/// Scans all records and returns `max(existing) + 1`, starting at
/// [`FIRST_ACCOUNT_NUMBER`] when the store is empty or absent. Closed
/// accounts still occupy their numbers, so numbers are never reused.
pub fn next_account_number(store: &RecordStore) -> Result<AccountNumber, LedgerError> {
    let max = store
        .read_all()?
        .iter()
        .map(|account| account.number)
        .max()
        .unwrap_or(FIRST_ACCOUNT_NUMBER - 1);

    Ok(max + 1)
}

/// Position of the record holding `number`
///
/// First match in store order; account numbers are unique by construction,
/// so first-match is also only-match.
///
/// # Errors
///
/// Returns `NotFound` if no record holds the given account number.
pub fn find_position(
    store: &RecordStore,
    number: AccountNumber,
) -> Result<Position, LedgerError> {
    store
        .read_all()?
        .iter()
        .position(|account| account.number == number)
        .map(|index| index as Position)
        .ok_or_else(|| LedgerError::not_found_account(number))
}
