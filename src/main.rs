//! Bank Ledger CLI
//!
//! Command-line interface over the file-backed account ledger.
//!
//! # Usage
//!
//! ```bash
//! export LEDGER_ADMIN_USER=admin
//! export LEDGER_ADMIN_PASS=secret
//! bank-ledger create --name "Ada Lovelace" --kind savings --balance 100
//! bank-ledger deposit 1001 50.25
//! bank-ledger transfer 1001 1002 30
//! bank-ledger list --sort balance
//! bank-ledger export --output accounts_export.csv
//! ```
//!
//! Every invocation passes the admin login gate before any ledger
//! operation runs: the username and password are read from stdin and
//! checked against the injected credentials.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (authentication failed, unknown account, store unavailable, etc.)

use bank_ledger::cli;
use bank_ledger::config::{AdminCredentials, ADMIN_PASS_ENV, ADMIN_USER_ENV};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Operational logging goes to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    // Credentials are injected configuration; there is no built-in secret
    let Some(credentials) = AdminCredentials::from_env() else {
        eprintln!(
            "Error: admin credentials not configured; set {} and {}.",
            ADMIN_USER_ENV, ADMIN_PASS_ENV
        );
        process::exit(1);
    };

    let stdin = std::io::stdin();
    let authenticated = matches!(
        cli::login(&credentials, &mut stdin.lock(), &mut std::io::stdout()),
        Ok(true)
    );
    if !authenticated {
        eprintln!("Authentication failed.");
        process::exit(1);
    }

    if let Err(e) = cli::run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
