//! I/O module
//!
//! Handles the on-disk record format and the file-level adapters.
//!
//! # Components
//!
//! - `record_format` - Fixed-width binary encode/decode for one record (pure, no I/O)
//! - `export` - CSV export of the full store snapshot
//! - `backup` - Whole-file backup and restore

pub mod backup;
pub mod export;
pub mod record_format;

pub use backup::{backup, restore};
pub use export::export_accounts_csv;
pub use record_format::RECORD_SIZE;
