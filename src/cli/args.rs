use crate::config::{DEFAULT_BACKUP_FILE, DEFAULT_DATA_FILE, DEFAULT_LOG_FILE};
use crate::core::SortKey;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Manage a file-backed account ledger
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Manage a file-backed account ledger", long_about = None)]
pub struct CliArgs {
    /// Record store file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Transaction log file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Backup file for `backup` / `restore`
    #[arg(long, value_name = "FILE", default_value = DEFAULT_BACKUP_FILE)]
    pub backup_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new account
    Create {
        /// Holder name
        #[arg(long)]
        name: String,

        /// Account type: Savings or Current
        #[arg(long)]
        kind: String,

        /// Initial deposit amount
        #[arg(long, default_value = "0")]
        balance: Decimal,

        /// Contact phone number
        #[arg(long, default_value = "")]
        phone: String,

        /// Postal address
        #[arg(long, default_value = "")]
        address: String,
    },

    /// Display an account and its recent transactions
    Show {
        /// Account number
        number: u32,
    },

    /// Deposit into an account
    Deposit {
        /// Account number
        number: u32,
        /// Amount to deposit
        amount: Decimal,
    },

    /// Withdraw from an account
    Withdraw {
        /// Account number
        number: u32,
        /// Amount to withdraw
        amount: Decimal,
    },

    /// Modify contact details and/or account type
    ///
    /// Omitted fields keep their current value. An invalid --kind is
    /// warned about and skipped while the other fields still apply.
    Modify {
        /// Account number
        number: u32,

        /// New phone number
        #[arg(long)]
        phone: Option<String>,

        /// New address
        #[arg(long)]
        address: Option<String>,

        /// New account type: Savings or Current
        #[arg(long)]
        kind: Option<String>,
    },

    /// Close an account (terminal; prompts unless --yes)
    Close {
        /// Account number
        number: u32,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// List active accounts
    List {
        /// Sort order
        #[arg(long, value_enum, default_value = "number")]
        sort: SortArg,
    },

    /// Transfer funds between two accounts
    Transfer {
        /// Source account number
        from: u32,
        /// Destination account number
        to: u32,
        /// Amount to transfer
        amount: Decimal,
    },

    /// Apply monthly interest to all Savings accounts
    Interest {
        /// Annual interest rate in percent
        rate: Decimal,
    },

    /// Export all accounts to CSV
    Export {
        /// Output file (stdout when omitted)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Copy the record store to the backup file
    Backup,

    /// Replace the record store with the backup file
    Restore,
}

/// Sort orders accepted by `list`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Number,
    Name,
    Balance,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Number => SortKey::Number,
            SortArg::Name => SortKey::Name,
            SortArg::Balance => SortKey::Balance,
        }
    }
}
