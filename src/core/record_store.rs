//! Position-addressed record store
//!
//! This module provides the `RecordStore`, the single owner of the on-disk
//! account file. The file is an array of fixed-width records in creation
//! order; position `p` maps to byte offset `p * RECORD_SIZE`. Positions are
//! never reused or compacted, so a record's position is stable for the
//! lifetime of its account.
//!
//! Every call opens the file, performs its I/O, and closes it again. No
//! write is buffered across calls, so a successful return means the bytes
//! have been handed to the operating system.

use crate::io::record_format::{self, RECORD_SIZE};
use crate::types::{Account, LedgerError, Position};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Fixed-width record file with position-addressed access
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Create a store handle for the given file path
    ///
    /// The file itself is created lazily by the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RecordStore { path: path.into() }
    }

    /// Path of the underlying record file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record at end-of-file and return its position
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` if the file cannot be opened for writing,
    /// or `InvalidAmount` if the balance cannot be encoded.
    pub fn append(&mut self, account: &Account) -> Result<Position, LedgerError> {
        let position = self.count()?;
        let bytes = encode_record(account)?;

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        file.write_all(&bytes)?;
        file.flush()?;

        Ok(position)
    }

    /// Read the record at `position`
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the position is beyond end-of-file or the file
    /// does not exist, `CorruptRecord` if the stored bytes do not decode.
    pub fn read_at(&self, position: Position) -> Result<Account, LedgerError> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LedgerError::not_found_position(position));
            }
            Err(e) => return Err(e.into()),
        };

        file.seek(SeekFrom::Start(position * RECORD_SIZE as u64))?;
        let mut bytes = [0u8; RECORD_SIZE];
        match file.read_exact(&mut bytes) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(LedgerError::not_found_position(position));
            }
            Err(e) => return Err(e.into()),
        }

        record_format::decode(&bytes).map_err(|msg| LedgerError::corrupt_record(position, msg))
    }

    /// Overwrite exactly one record slot in place
    ///
    /// Surrounding records are not shifted.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the position does not name an existing slot,
    /// `StoreUnavailable` on I/O failure.
    pub fn write_at(&mut self, position: Position, account: &Account) -> Result<(), LedgerError> {
        if position >= self.count()? {
            return Err(LedgerError::not_found_position(position));
        }
        let bytes = encode_record(account)?;

        let mut file = OpenOptions::new().write(true).open(&self.path)?;
        file.seek(SeekFrom::Start(position * RECORD_SIZE as u64))?;
        file.write_all(&bytes)?;
        file.flush()?;

        Ok(())
    }

    /// Number of records currently stored, closed accounts included
    ///
    /// Derived from the file size. A missing file counts as zero records,
    /// never as an error.
    pub fn count(&self) -> Result<u64, LedgerError> {
        match std::fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() / RECORD_SIZE as u64),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Read every record in position order
    ///
    /// Used by the bulk operations (listing, interest, export). A missing
    /// file yields an empty vector.
    pub fn read_all(&self) -> Result<Vec<Account>, LedgerError> {
        let count = self.count()?;
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut file = File::open(&self.path)?;
        let mut accounts = Vec::with_capacity(count as usize);
        let mut bytes = [0u8; RECORD_SIZE];
        for position in 0..count {
            file.read_exact(&mut bytes)?;
            let account = record_format::decode(&bytes)
                .map_err(|msg| LedgerError::corrupt_record(position, msg))?;
            accounts.push(account);
        }

        Ok(accounts)
    }

    /// Rewrite the whole store from position 0 in one pass
    ///
    /// The caller is expected to pass the full record set in position
    /// order; records keep their positions. This is the bulk counterpart
    /// of `write_at` used by interest application.
    pub fn write_all(&mut self, accounts: &[Account]) -> Result<(), LedgerError> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .open(&self.path)?;
        for account in accounts {
            file.write_all(&encode_record(account)?)?;
        }
        file.flush()?;

        Ok(())
    }
}

fn encode_record(account: &Account) -> Result<[u8; RECORD_SIZE], LedgerError> {
    record_format::encode(account).map_err(|_| LedgerError::invalid_amount(account.balance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountKind;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn account(number: u32, balance_minor: i64) -> Account {
        Account {
            number,
            holder_name: format!("Holder {}", number),
            kind: AccountKind::Savings,
            balance: Decimal::new(balance_minor, 2),
            phone: "555-0100".to_string(),
            address: "1 Bank St".to_string(),
            active: true,
        }
    }

    fn store_in(dir: &TempDir) -> RecordStore {
        RecordStore::new(dir.path().join("accounts.dat"))
    }

    #[test]
    fn count_is_zero_for_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn append_assigns_sequential_positions() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        assert_eq!(store.append(&account(1001, 100_00)).unwrap(), 0);
        assert_eq!(store.append(&account(1002, 200_00)).unwrap(), 1);
        assert_eq!(store.append(&account(1003, 300_00)).unwrap(), 2);
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn read_at_returns_appended_record() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let expected = account(1002, 250_50);
        store.append(&account(1001, 100_00)).unwrap();
        let position = store.append(&expected).unwrap();

        assert_eq!(store.read_at(position).unwrap(), expected);
    }

    #[test]
    fn read_at_past_end_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.append(&account(1001, 100_00)).unwrap();

        let result = store.read_at(5);
        assert!(matches!(result, Err(LedgerError::NotFound { .. })));
    }

    #[test]
    fn read_at_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let result = store.read_at(0);
        assert!(matches!(result, Err(LedgerError::NotFound { .. })));
    }

    #[test]
    fn write_at_overwrites_in_place_without_shifting_neighbors() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.append(&account(1001, 100_00)).unwrap();
        store.append(&account(1002, 200_00)).unwrap();
        store.append(&account(1003, 300_00)).unwrap();

        let updated = account(1002, 175_25);
        store.write_at(1, &updated).unwrap();

        assert_eq!(store.count().unwrap(), 3);
        assert_eq!(store.read_at(0).unwrap(), account(1001, 100_00));
        assert_eq!(store.read_at(1).unwrap(), updated);
        assert_eq!(store.read_at(2).unwrap(), account(1003, 300_00));
    }

    #[test]
    fn write_at_past_end_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.append(&account(1001, 100_00)).unwrap();

        let result = store.write_at(3, &account(1001, 100_00));
        assert!(matches!(result, Err(LedgerError::NotFound { .. })));
    }

    #[test]
    fn read_all_returns_records_in_position_order() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let accounts = vec![
            account(1001, 100_00),
            account(1002, 200_00),
            account(1003, 300_00),
        ];
        for a in &accounts {
            store.append(a).unwrap();
        }

        assert_eq!(store.read_all().unwrap(), accounts);
    }

    #[test]
    fn write_all_round_trips_the_full_record_set() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.append(&account(1001, 100_00)).unwrap();
        store.append(&account(1002, 200_00)).unwrap();

        let mut accounts = store.read_all().unwrap();
        accounts[0].balance = Decimal::new(111_11, 2);
        accounts[1].balance = Decimal::new(222_22, 2);
        store.write_all(&accounts).unwrap();

        assert_eq!(store.read_all().unwrap(), accounts);
    }

    #[test]
    fn corrupt_bytes_surface_as_corrupt_record() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.append(&account(1001, 100_00)).unwrap();

        // Stamp an invalid kind tag directly into the file
        let mut bytes = std::fs::read(store.path()).unwrap();
        bytes[4] = 0xFF;
        std::fs::write(store.path(), bytes).unwrap();

        let result = store.read_at(0);
        assert!(matches!(result, Err(LedgerError::CorruptRecord { .. })));
    }
}
