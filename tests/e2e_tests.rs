//! End-to-end scenario tests
//!
//! These tests drive the ledger through the public library surface against
//! real files in a temporary directory, then inspect both the returned
//! values and the persisted state (record store bytes and transaction log
//! lines).

use bank_ledger::io::{backup, export_accounts_csv, restore};
use bank_ledger::types::TxKind;
use bank_ledger::{
    AccountKind, CreateRequest, Ledger, LedgerError, RecordStore, SortKey, TransactionLog,
};
use rstest::rstest;
use rust_decimal::Decimal;
use std::fs;
use tempfile::TempDir;

fn ledger_in(dir: &TempDir) -> Ledger {
    Ledger::new(
        RecordStore::new(dir.path().join("accounts.dat")),
        TransactionLog::new(dir.path().join("transactions.txt")),
    )
}

fn request(name: &str, kind: AccountKind, balance_minor: i64) -> CreateRequest {
    CreateRequest {
        holder_name: name.to_string(),
        kind,
        initial_balance: Decimal::new(balance_minor, 2),
        phone: "555-0100".to_string(),
        address: "1 Bank St".to_string(),
    }
}

fn log_lines(dir: &TempDir) -> Vec<String> {
    fs::read_to_string(dir.path().join("transactions.txt"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn account_numbers_start_at_1001_and_are_never_reused() {
    let dir = TempDir::new().unwrap();
    let mut ledger = ledger_in(&dir);

    let first = ledger
        .create(request("First", AccountKind::Savings, 0))
        .unwrap();
    let second = ledger
        .create(request("Second", AccountKind::Current, 0))
        .unwrap();
    assert_eq!(first.number, 1001);
    assert_eq!(second.number, 1002);

    ledger.close(1001).unwrap();

    let third = ledger
        .create(request("Third", AccountKind::Savings, 0))
        .unwrap();
    assert_eq!(third.number, 1003);
}

#[rstest]
#[case::small(1_00)]
#[case::typical(250_50)]
#[case::large(1_000_000_00)]
fn deposit_increases_balance_by_exactly_the_amount(#[case] amount_minor: i64) {
    let dir = TempDir::new().unwrap();
    let mut ledger = ledger_in(&dir);
    ledger
        .create(request("Holder", AccountKind::Savings, 500_00))
        .unwrap();

    let amount = Decimal::new(amount_minor, 2);
    let before = ledger.account(1001).unwrap().balance;
    let after = ledger.deposit(1001, amount).unwrap().balance;

    assert_eq!(after, before + amount);

    // A DEPOSIT entry with the resulting balance is on the log
    let last = log_lines(&dir).pop().unwrap();
    assert!(last.contains("DEPOSIT"));
    assert!(last.contains(&format!("{:.2}", after)));
}

#[test]
fn savings_withdrawal_succeeds_iff_floor_is_respected() {
    let dir = TempDir::new().unwrap();
    let mut ledger = ledger_in(&dir);
    ledger
        .create(request("Holder", AccountKind::Savings, 100_00))
        .unwrap();

    // Exactly down to zero succeeds
    assert!(ledger.withdraw(1001, Decimal::new(40_00, 2)).is_ok());
    assert!(ledger.withdraw(1001, Decimal::new(60_00, 2)).is_ok());
    assert_eq!(ledger.account(1001).unwrap().balance, Decimal::ZERO);

    // One cent below zero fails and leaves state unchanged
    let result = ledger.withdraw(1001, Decimal::new(1, 2));
    assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })));
    assert_eq!(ledger.account(1001).unwrap().balance, Decimal::ZERO);
}

#[test]
fn closing_twice_is_rejected_and_leaves_the_record_closed() {
    let dir = TempDir::new().unwrap();
    let mut ledger = ledger_in(&dir);
    ledger
        .create(request("Holder", AccountKind::Current, 75_00))
        .unwrap();

    ledger.close(1001).unwrap();
    let result = ledger.close(1001);
    assert!(matches!(result, Err(LedgerError::AlreadyClosed { .. })));

    let stored = ledger.account(1001).unwrap();
    assert!(!stored.active);
    assert_eq!(stored.balance, Decimal::new(75_00, 2));

    // Exactly one CLOSE entry with zero amount and the final balance
    let closes: Vec<String> = log_lines(&dir)
        .into_iter()
        .filter(|line| line.contains("CLOSE"))
        .collect();
    assert_eq!(closes.len(), 1);
    assert!(closes[0].starts_with("1001, CLOSE, 0.00, 75.00"));
}

#[test]
fn transfer_scenario_moves_30_from_savings_100_to_current_50() {
    let dir = TempDir::new().unwrap();
    let mut ledger = ledger_in(&dir);
    ledger
        .create(request("Source", AccountKind::Savings, 100_00))
        .unwrap();
    ledger
        .create(request("Destination", AccountKind::Current, 50_00))
        .unwrap();

    let receipt = ledger
        .transfer(1001, 1002, Decimal::new(30_00, 2))
        .unwrap();
    assert_eq!(receipt.source.balance, Decimal::new(70_00, 2));
    assert_eq!(receipt.destination.balance, Decimal::new(80_00, 2));

    // Log order: TRANSFER_OUT(30, 70) then TRANSFER_IN(30, 80)
    let lines = log_lines(&dir);
    let out_index = lines
        .iter()
        .position(|l| l.starts_with("1001, TRANSFER_OUT, 30.00, 70.00"))
        .expect("TRANSFER_OUT entry");
    let in_index = lines
        .iter()
        .position(|l| l.starts_with("1002, TRANSFER_IN, 30.00, 80.00"))
        .expect("TRANSFER_IN entry");
    assert_eq!(in_index, out_index + 1);
}

#[test]
fn interest_scenario_credits_savings_and_leaves_current_untouched() {
    let dir = TempDir::new().unwrap();
    let mut ledger = ledger_in(&dir);
    ledger
        .create(request("Saver", AccountKind::Savings, 1200_00))
        .unwrap();
    ledger
        .create(request("Spender", AccountKind::Current, 1200_00))
        .unwrap();

    let summary = ledger.apply_interest(Decimal::from(12)).unwrap();

    assert_eq!(summary.accounts_credited, 1);
    assert_eq!(summary.total_interest, Decimal::new(12_00, 2));
    assert_eq!(
        ledger.account(1001).unwrap().balance,
        Decimal::new(1212_00, 2)
    );
    assert_eq!(
        ledger.account(1002).unwrap().balance,
        Decimal::new(1200_00, 2)
    );

    let interest_lines: Vec<String> = log_lines(&dir)
        .into_iter()
        .filter(|l| l.contains("INTEREST"))
        .collect();
    assert_eq!(interest_lines.len(), 1);
    assert!(interest_lines[0].starts_with("1001, INTEREST, 12.00, 1212.00"));
}

#[test]
fn backup_then_restore_reproduces_the_store_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let mut ledger = ledger_in(&dir);
    ledger
        .create(request("Holder", AccountKind::Savings, 100_00))
        .unwrap();
    ledger
        .create(request("Other", AccountKind::Current, 200_00))
        .unwrap();

    let data = dir.path().join("accounts.dat");
    let bak = dir.path().join("accounts.bak");
    let original = fs::read(&data).unwrap();

    backup(&data, &bak).unwrap();
    restore(&bak, &data).unwrap();

    assert_eq!(fs::read(&data).unwrap(), original);
}

#[test]
fn restore_rolls_the_store_back_to_the_backup_snapshot() {
    let dir = TempDir::new().unwrap();
    let mut ledger = ledger_in(&dir);
    ledger
        .create(request("Holder", AccountKind::Savings, 100_00))
        .unwrap();

    let data = dir.path().join("accounts.dat");
    let bak = dir.path().join("accounts.bak");
    backup(&data, &bak).unwrap();
    let snapshot = fs::read(&data).unwrap();

    // Mutate after the backup, then restore over it
    ledger.deposit(1001, Decimal::new(55_00, 2)).unwrap();
    assert_ne!(fs::read(&data).unwrap(), snapshot);

    restore(&bak, &data).unwrap();
    assert_eq!(fs::read(&data).unwrap(), snapshot);
    assert_eq!(
        ledger.account(1001).unwrap().balance,
        Decimal::new(100_00, 2)
    );
}

#[test]
fn modify_with_no_fields_reports_success_and_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut ledger = ledger_in(&dir);
    let before = ledger
        .create(request("Holder", AccountKind::Savings, 100_00))
        .unwrap();

    let after = ledger
        .modify(1001, bank_ledger::AccountUpdate::default())
        .unwrap();

    assert_eq!(after, before);
    assert_eq!(ledger.account(1001).unwrap(), before);
}

#[test]
fn export_snapshot_includes_closed_accounts() {
    let dir = TempDir::new().unwrap();
    let mut ledger = ledger_in(&dir);
    ledger
        .create(request("Open", AccountKind::Savings, 100_00))
        .unwrap();
    ledger
        .create(request("Shut", AccountKind::Current, 50_00))
        .unwrap();
    ledger.close(1002).unwrap();

    let mut output = Vec::new();
    let rows = export_accounts_csv(ledger.store(), &mut output).unwrap();
    assert_eq!(rows, 2);

    let csv = String::from_utf8(output).unwrap();
    assert!(csv.contains("1001,Open,Savings,100.00,555-0100,1 Bank St,1"));
    assert!(csv.contains("1002,Shut,Current,50.00,555-0100,1 Bank St,0"));
}

#[test]
fn listing_orders_follow_the_requested_sort_key() {
    let dir = TempDir::new().unwrap();
    let mut ledger = ledger_in(&dir);
    ledger
        .create(request("Carol", AccountKind::Savings, 300_00))
        .unwrap();
    ledger
        .create(request("alice", AccountKind::Current, 100_00))
        .unwrap();
    ledger
        .create(request("Bob", AccountKind::Savings, 200_00))
        .unwrap();

    let names: Vec<String> = ledger
        .list(SortKey::Name)
        .unwrap()
        .into_iter()
        .map(|a| a.holder_name)
        .collect();
    assert_eq!(names, vec!["alice", "Bob", "Carol"]);

    let balances: Vec<Decimal> = ledger
        .list(SortKey::Balance)
        .unwrap()
        .into_iter()
        .map(|a| a.balance)
        .collect();
    assert_eq!(
        balances,
        vec![
            Decimal::new(100_00, 2),
            Decimal::new(200_00, 2),
            Decimal::new(300_00, 2)
        ]
    );
}

#[test]
fn full_session_survives_reopening_the_ledger() {
    let dir = TempDir::new().unwrap();
    {
        let mut ledger = ledger_in(&dir);
        ledger
            .create(request("Holder", AccountKind::Savings, 100_00))
            .unwrap();
        ledger.deposit(1001, Decimal::new(25_00, 2)).unwrap();
    }

    // A fresh ledger over the same files sees the persisted state
    let mut ledger = ledger_in(&dir);
    assert_eq!(
        ledger.account(1001).unwrap().balance,
        Decimal::new(125_00, 2)
    );
    assert_eq!(ledger.recent_transactions(1001, 10).len(), 2);

    let next = ledger
        .create(request("Second", AccountKind::Current, 0))
        .unwrap();
    assert_eq!(next.number, 1002);

    let entries = ledger.recent_transactions(1001, 10);
    assert_eq!(entries[0].kind, TxKind::Create);
    assert_eq!(entries[1].kind, TxKind::Deposit);
}
