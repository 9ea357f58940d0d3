//! Ledger operations engine
//!
//! This module provides the `Ledger`, which orchestrates every account
//! operation against the record store and the transaction log. Each
//! operation is a read-validate-mutate-write cycle: the record is re-read
//! from disk, validated, mutated in memory, written back to its slot, and
//! the event is appended to the transaction log.
//!
//! The engine enforces the ledger invariants:
//! - balance-affecting operations require an active account
//! - amounts must be strictly positive
//! - Savings balances never go negative on withdrawal-class mutations
//!
//! The model is single-writer and synchronous. Every mutating method takes
//! `&mut self`, so the whole-file rewrite performed by
//! [`Ledger::apply_interest`] can never interleave with a single-record
//! write.

use crate::core::account_index;
use crate::core::record_store::RecordStore;
use crate::core::transaction_log::TransactionLog;
use crate::types::{Account, AccountKind, AccountNumber, LedgerError, LogEntry, Position, TxKind};
use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::{info, warn};

const MONTHS_PER_YEAR: u32 = 12;

/// Request payload for creating an account
#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub holder_name: String,
    pub kind: AccountKind,
    pub initial_balance: Decimal,
    pub phone: String,
    pub address: String,
}

/// Field changes for a modify operation
///
/// Each field is independently optional. `None` or an empty string means
/// "keep the current value"; kind validation happens at the caller
/// boundary, so a request with every field absent is a successful no-op.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub phone: Option<String>,
    pub address: Option<String>,
    pub kind: Option<AccountKind>,
}

/// Outcome of a completed transfer
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    /// Source account after the debit
    pub source: Account,
    /// Destination account after the credit
    pub destination: Account,
    /// Transferred amount
    pub amount: Decimal,
}

/// Outcome of a bulk interest pass
#[derive(Debug, Clone, PartialEq)]
pub struct InterestSummary {
    /// Number of Savings accounts credited
    pub accounts_credited: usize,
    /// Sum of all credited interest
    pub total_interest: Decimal,
}

/// Sort order for account listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Number,
    Name,
    Balance,
}

/// Account operations engine
///
/// Owns the record store and the transaction log. One `Ledger` is the
/// single active writer; callers invoke its operations with validated
/// arguments and render the results.
#[derive(Debug)]
pub struct Ledger {
    store: RecordStore,
    log: TransactionLog,
}

impl Ledger {
    /// Create a ledger over the given store and log
    pub fn new(store: RecordStore, log: TransactionLog) -> Self {
        Ledger { store, log }
    }

    /// The underlying record store (read-only collaborator access)
    ///
    /// Used by the export and backup adapters, which are pure consumers of
    /// the store snapshot.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Create a new account
    ///
    /// Assigns the next unused account number, appends the record, and logs
    /// a `CREATE` event carrying the initial balance.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if the initial balance is negative (zero is
    /// allowed), or a store error if the append fails.
    pub fn create(&mut self, request: CreateRequest) -> Result<Account, LedgerError> {
        if request.initial_balance < Decimal::ZERO {
            return Err(LedgerError::invalid_amount(request.initial_balance));
        }

        let number = account_index::next_account_number(&self.store)?;
        let account = Account {
            number,
            holder_name: request.holder_name,
            kind: request.kind,
            balance: request.initial_balance.round_dp(2),
            phone: request.phone,
            address: request.address,
            active: true,
        };

        self.store.append(&account)?;
        self.log.append(
            number,
            TxKind::Create,
            account.balance,
            account.balance,
            Self::timestamp(),
        );
        info!(number, kind = %account.kind, "account created");

        Ok(account)
    }

    /// Look up an account by number, closed accounts included
    pub fn account(&self, number: AccountNumber) -> Result<Account, LedgerError> {
        Ok(self.locate(number)?.1)
    }

    /// First `limit` transaction log entries for an account, oldest first
    pub fn recent_transactions(&self, number: AccountNumber, limit: usize) -> Vec<LogEntry> {
        self.log.recent_for(number, limit)
    }

    /// Deposit into an active account
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `AccountClosed`, or `InvalidAmount` (amount must
    /// be strictly positive).
    pub fn deposit(
        &mut self,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<Account, LedgerError> {
        let amount = positive_amount(amount)?;
        let (position, mut account) = self.locate_active(number)?;

        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::invalid_amount(amount))?;

        self.store.write_at(position, &account)?;
        self.log.append(
            number,
            TxKind::Deposit,
            amount,
            account.balance,
            Self::timestamp(),
        );

        Ok(account)
    }

    /// Withdraw from an active account
    ///
    /// Savings accounts enforce the non-negative floor; Current accounts
    /// may overdraw.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `AccountClosed`, `InvalidAmount`, or
    /// `InsufficientFunds` when the Savings floor would be violated (the
    /// stored record is left unchanged).
    pub fn withdraw(
        &mut self,
        number: AccountNumber,
        amount: Decimal,
    ) -> Result<Account, LedgerError> {
        let amount = positive_amount(amount)?;
        let (position, mut account) = self.locate_active(number)?;

        account.balance = debit(&account, amount)?;

        self.store.write_at(position, &account)?;
        self.log.append(
            number,
            TxKind::Withdraw,
            amount,
            account.balance,
            Self::timestamp(),
        );

        Ok(account)
    }

    /// Modify contact fields and/or the account kind
    ///
    /// Absent (or empty) fields keep their current value; a request with
    /// every field absent succeeds and changes nothing. Modifications are
    /// not logged as transactions.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `AccountClosed`.
    pub fn modify(
        &mut self,
        number: AccountNumber,
        update: AccountUpdate,
    ) -> Result<Account, LedgerError> {
        let (position, mut account) = self.locate_active(number)?;

        if let Some(phone) = update.phone.filter(|value| !value.is_empty()) {
            account.phone = phone;
        }
        if let Some(address) = update.address.filter(|value| !value.is_empty()) {
            account.address = address;
        }
        if let Some(kind) = update.kind {
            account.kind = kind;
        }

        self.store.write_at(position, &account)?;

        Ok(account)
    }

    /// Close an active account
    ///
    /// Closed is terminal: the record stays in storage, the slot is never
    /// reused, and the number is never reassigned. Confirmation is the
    /// caller's responsibility. Logs a `CLOSE` event with zero amount and
    /// the final balance.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `AlreadyClosed`.
    pub fn close(&mut self, number: AccountNumber) -> Result<Account, LedgerError> {
        let (position, mut account) = self.locate(number)?;
        if !account.active {
            return Err(LedgerError::already_closed(number));
        }

        account.active = false;
        self.store.write_at(position, &account)?;
        self.log.append(
            number,
            TxKind::Close,
            Decimal::ZERO,
            account.balance,
            Self::timestamp(),
        );
        info!(number, "account closed");

        Ok(account)
    }

    /// Active accounts in the requested order
    pub fn list(&self, sort: SortKey) -> Result<Vec<Account>, LedgerError> {
        let mut accounts: Vec<Account> = self
            .store
            .read_all()?
            .into_iter()
            .filter(|account| account.active)
            .collect();

        match sort {
            SortKey::Number => accounts.sort_by_key(|account| account.number),
            SortKey::Name => accounts.sort_by(|a, b| {
                a.holder_name
                    .to_lowercase()
                    .cmp(&b.holder_name.to_lowercase())
            }),
            SortKey::Balance => accounts.sort_by(|a, b| a.balance.cmp(&b.balance)),
        }

        Ok(accounts)
    }

    /// Transfer between two distinct active accounts
    ///
    /// The Savings floor applies to the source only. Both records are
    /// mutated in memory, then persisted source first. If the source write
    /// succeeds and the destination write fails, the ledger is left with
    /// money debited but not credited: the operation returns
    /// `PartialTransfer` and performs no rollback; that state requires
    /// manual reconciliation. `TRANSFER_OUT` and `TRANSFER_IN` are logged,
    /// in that order, only when both writes succeed.
    ///
    /// # Errors
    ///
    /// Returns `SameAccount`, `NotFound`, `AccountClosed`, `InvalidAmount`,
    /// `InsufficientFunds`, or `PartialTransfer`.
    pub fn transfer(
        &mut self,
        from: AccountNumber,
        to: AccountNumber,
        amount: Decimal,
    ) -> Result<TransferReceipt, LedgerError> {
        let amount = positive_amount(amount)?;
        if from == to {
            return Err(LedgerError::same_account(from));
        }

        let (source_position, mut source) = self.locate_active(from)?;
        let (destination_position, mut destination) = self.locate_active(to)?;

        source.balance = debit(&source, amount)?;
        destination.balance = destination
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::invalid_amount(amount))?;

        self.store.write_at(source_position, &source)?;
        if let Err(e) = self.store.write_at(destination_position, &destination) {
            warn!(
                from,
                to,
                amount = %amount,
                error = %e,
                "transfer debited source but failed to credit destination"
            );
            return Err(LedgerError::partial_transfer(from, to, amount));
        }

        let now = Self::timestamp();
        self.log
            .append(from, TxKind::TransferOut, amount, source.balance, now);
        self.log
            .append(to, TxKind::TransferIn, amount, destination.balance, now);
        info!(from, to, amount = %amount, "transfer complete");

        Ok(TransferReceipt {
            source,
            destination,
            amount,
        })
    }

    /// Apply monthly interest to every active Savings account
    ///
    /// `annual_rate_percent` is an annual rate; each credited account
    /// receives `balance * (rate / 100) / 12`, rounded to 2 decimal places.
    /// This is the one bulk operation: every record is loaded, mutated in
    /// memory, logged, and the whole store is rewritten in a single pass.
    /// Closed and Current accounts are read and rewritten untouched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if the rate is not strictly positive, or a
    /// store error from the bulk read/rewrite.
    pub fn apply_interest(
        &mut self,
        annual_rate_percent: Decimal,
    ) -> Result<InterestSummary, LedgerError> {
        if annual_rate_percent <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(annual_rate_percent));
        }

        let mut accounts = self.store.read_all()?;
        let now = Self::timestamp();
        let mut credited = 0usize;
        let mut total_interest = Decimal::ZERO;

        for account in accounts.iter_mut() {
            if !account.active || account.kind != AccountKind::Savings {
                continue;
            }

            let interest = (account.balance * annual_rate_percent
                / Decimal::ONE_HUNDRED
                / Decimal::from(MONTHS_PER_YEAR))
            .round_dp(2);
            account.balance = account
                .balance
                .checked_add(interest)
                .ok_or_else(|| LedgerError::invalid_amount(interest))?;

            self.log.append(
                account.number,
                TxKind::Interest,
                interest,
                account.balance,
                now,
            );
            credited += 1;
            total_interest += interest;
        }

        self.store.write_all(&accounts)?;
        info!(credited, total = %total_interest, "interest applied");

        Ok(InterestSummary {
            accounts_credited: credited,
            total_interest,
        })
    }

    /// Resolve an account number to its position and current record
    fn locate(&self, number: AccountNumber) -> Result<(Position, Account), LedgerError> {
        let position = account_index::find_position(&self.store, number)?;
        let account = self.store.read_at(position)?;
        Ok((position, account))
    }

    /// Like `locate`, but rejects closed accounts
    fn locate_active(&self, number: AccountNumber) -> Result<(Position, Account), LedgerError> {
        let (position, account) = self.locate(number)?;
        if !account.active {
            return Err(LedgerError::account_closed(number));
        }
        Ok((position, account))
    }

    fn timestamp() -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Validate a strictly positive amount, normalized to 2 decimal places
fn positive_amount(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::invalid_amount(amount));
    }
    Ok(amount.round_dp(2))
}

/// Debit an amount, enforcing the Savings floor
fn debit(account: &Account, amount: Decimal) -> Result<Decimal, LedgerError> {
    let new_balance = account
        .balance
        .checked_sub(amount)
        .ok_or_else(|| LedgerError::invalid_amount(amount))?;

    if account.kind == AccountKind::Savings && new_balance < Decimal::ZERO {
        return Err(LedgerError::insufficient_funds(
            account.number,
            account.balance,
            amount,
        ));
    }

    Ok(new_balance)
}
