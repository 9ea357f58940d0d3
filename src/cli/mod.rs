// CLI module
// Command-line adapter over the ledger operations

mod args;

pub use args::{CliArgs, Command, SortArg};

use crate::config::AdminCredentials;
use crate::core::{
    AccountUpdate, CreateRequest, Ledger, RecordStore, TransactionLog,
};
use crate::io::{backup, export_accounts_csv, restore};
use crate::types::{Account, AccountKind, LedgerError};
use clap::Parser;
use std::fs::File;
use std::io::{BufRead, Write};

/// How many transactions `show` prints per account
const RECENT_LIMIT: usize = 10;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing required arguments, or the
/// --help flag), clap displays an error message or help text and exits the
/// process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Interactive admin login gate
///
/// Prompts for a username and password on `input` and checks them against
/// the injected credentials. The ledger operations are only reachable
/// after this returns `Ok(true)`.
pub fn login(
    credentials: &AdminCredentials,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<bool, LedgerError> {
    write!(output, "User: ")?;
    output.flush()?;
    let mut user = String::new();
    input.read_line(&mut user)?;

    write!(output, "Password: ")?;
    output.flush()?;
    let mut password = String::new();
    input.read_line(&mut password)?;

    Ok(credentials.verify(user.trim_end(), password.trim_end()))
}

/// Dispatch one parsed command against the ledger
///
/// Renders results to stdout; errors propagate to the caller for display.
pub fn run(args: CliArgs) -> Result<(), LedgerError> {
    let mut ledger = Ledger::new(
        RecordStore::new(&args.data_file),
        TransactionLog::new(&args.log_file),
    );

    match args.command {
        Command::Create {
            name,
            kind,
            balance,
            phone,
            address,
        } => {
            let kind: AccountKind = kind.parse()?;
            let account = ledger.create(CreateRequest {
                holder_name: name,
                kind,
                initial_balance: balance,
                phone,
                address,
            })?;
            println!("Account created. Number: {}", account.number);
        }

        Command::Show { number } => {
            let account = ledger.account(number)?;
            if !account.active {
                println!("Account {} is closed.", number);
                return Ok(());
            }
            print_account(&account);

            let entries = ledger.recent_transactions(number, RECENT_LIMIT);
            if entries.is_empty() {
                println!("No transactions found for this account.");
            } else {
                println!("Recent transactions (oldest first):");
                for entry in entries {
                    println!("{}", entry);
                }
            }
        }

        Command::Deposit { number, amount } => {
            let account = ledger.deposit(number, amount)?;
            println!("Deposit successful. New balance: {:.2}", account.balance);
        }

        Command::Withdraw { number, amount } => {
            let account = ledger.withdraw(number, amount)?;
            println!("Withdrawal successful. New balance: {:.2}", account.balance);
        }

        Command::Modify {
            number,
            phone,
            address,
            kind,
        } => {
            // An invalid type is warned about but must not abort the other
            // field updates
            let kind = match kind.as_deref() {
                None => None,
                Some(raw) => match raw.parse::<AccountKind>() {
                    Ok(kind) => Some(kind),
                    Err(e) => {
                        eprintln!("Warning: {}; keeping current type.", e);
                        None
                    }
                },
            };
            ledger.modify(
                number,
                AccountUpdate {
                    phone,
                    address,
                    kind,
                },
            )?;
            println!("Account modified successfully.");
        }

        Command::Close { number, yes } => {
            if !yes && !confirm_close(number)? {
                println!("Operation cancelled.");
                return Ok(());
            }
            let account = ledger.close(number)?;
            println!(
                "Account {} closed. Final balance: {:.2}",
                number, account.balance
            );
        }

        Command::List { sort } => {
            let accounts = ledger.list(sort.into())?;
            if accounts.is_empty() {
                println!("No accounts found.");
            } else {
                for account in accounts {
                    println!(
                        "{} | {} | {} | {:.2}",
                        account.number, account.holder_name, account.kind, account.balance
                    );
                }
            }
        }

        Command::Transfer { from, to, amount } => {
            let receipt = ledger.transfer(from, to, amount)?;
            println!(
                "Transfer successful. New balances: {} -> {:.2}, {} -> {:.2}",
                receipt.source.number,
                receipt.source.balance,
                receipt.destination.number,
                receipt.destination.balance
            );
        }

        Command::Interest { rate } => {
            let summary = ledger.apply_interest(rate)?;
            println!(
                "Interest applied to {} savings account(s), total {:.2}.",
                summary.accounts_credited, summary.total_interest
            );
        }

        Command::Export { output } => {
            let rows = match output {
                Some(path) => {
                    let mut file = File::create(&path)?;
                    let rows = export_accounts_csv(ledger.store(), &mut file)?;
                    println!("Exported {} account(s) to {}", rows, path.display());
                    rows
                }
                None => export_accounts_csv(ledger.store(), &mut std::io::stdout())?,
            };
            if rows == 0 {
                println!("No accounts to export.");
            }
        }

        Command::Backup => {
            backup(&args.data_file, &args.backup_file)?;
            println!("Backup created: {}", args.backup_file.display());
        }

        Command::Restore => {
            restore(&args.backup_file, &args.data_file)?;
            println!("Data restored from backup.");
        }
    }

    Ok(())
}

fn print_account(account: &Account) {
    println!("Account No: {}", account.number);
    println!("Name: {}", account.holder_name);
    println!("Type: {}", account.kind);
    println!("Balance: {:.2}", account.balance);
    println!("Phone: {}", account.phone);
    println!("Address: {}", account.address);
}

fn confirm_close(number: u32) -> Result<bool, LedgerError> {
    print!("Are you sure you want to close account {}? (y/n): ", number);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y"))
}
