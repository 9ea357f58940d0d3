//! Backup and restore adapter
//!
//! Whole-medium byte copy of the record store to and from a secondary
//! location. The copy is copy-then-replace with no atomicity guarantee
//! against concurrent writers, so neither direction may run while a
//! mutating operation is in flight.

use crate::types::LedgerError;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::info;

/// Copy the record store file to the backup location
///
/// Returns the number of bytes copied.
///
/// # Errors
///
/// Returns `StoreUnavailable` if the data file is missing or either side
/// fails.
pub fn backup(data_file: &Path, backup_file: &Path) -> Result<u64, LedgerError> {
    let bytes = copy_file(data_file, backup_file)?;
    info!(bytes, backup = %backup_file.display(), "backup created");
    Ok(bytes)
}

/// Replace the record store file with the backup copy
///
/// Returns the number of bytes copied.
///
/// # Errors
///
/// Returns `StoreUnavailable` if the backup file is missing or either side
/// fails.
pub fn restore(backup_file: &Path, data_file: &Path) -> Result<u64, LedgerError> {
    let bytes = copy_file(backup_file, data_file)?;
    info!(bytes, data = %data_file.display(), "data restored from backup");
    Ok(bytes)
}

fn copy_file(src: &Path, dst: &Path) -> Result<u64, LedgerError> {
    let mut reader = File::open(src)
        .map_err(|e| LedgerError::store_unavailable(format!("{}: {}", src.display(), e)))?;
    let mut writer = File::create(dst)
        .map_err(|e| LedgerError::store_unavailable(format!("{}: {}", dst.display(), e)))?;

    Ok(io::copy(&mut reader, &mut writer)?)
}
