//! Runtime configuration
//!
//! File locations for the record store, transaction log, and backup copy,
//! plus the injected admin credentials that gate the CLI. The core engine
//! has no authentication concept and embeds no secrets; credentials come
//! from the environment.

use std::env;
use std::path::PathBuf;

/// Default record store file
pub const DEFAULT_DATA_FILE: &str = "accounts.dat";
/// Default transaction log file
pub const DEFAULT_LOG_FILE: &str = "transactions.txt";
/// Default backup file
pub const DEFAULT_BACKUP_FILE: &str = "accounts.bak";

/// Environment variable holding the admin username
pub const ADMIN_USER_ENV: &str = "LEDGER_ADMIN_USER";
/// Environment variable holding the admin password
pub const ADMIN_PASS_ENV: &str = "LEDGER_ADMIN_PASS";

/// File locations used by one ledger instance
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Record store file (fixed-width binary records)
    pub data_file: PathBuf,
    /// Transaction log file (newline-delimited text)
    pub log_file: PathBuf,
    /// Backup copy of the record store
    pub backup_file: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            backup_file: PathBuf::from(DEFAULT_BACKUP_FILE),
        }
    }
}

/// Injected admin credentials
///
/// A pass/fail gate in front of the CLI, nothing more. Comparison is a
/// plain equality check against the configured pair.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    user: String,
    password: String,
}

impl AdminCredentials {
    /// Build credentials from explicit values
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        AdminCredentials {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Load credentials from [`ADMIN_USER_ENV`] and [`ADMIN_PASS_ENV`]
    ///
    /// Returns `None` when either variable is unset, in which case the CLI
    /// refuses to start rather than falling back to a built-in secret.
    pub fn from_env() -> Option<Self> {
        let user = env::var(ADMIN_USER_ENV).ok()?;
        let password = env::var(ADMIN_PASS_ENV).ok()?;
        Some(AdminCredentials { user, password })
    }

    /// Check a login attempt
    pub fn verify(&self, user: &str, password: &str) -> bool {
        self.user == user && self.password == password
    }
}
