//! Fixed-width on-disk record format
//!
//! This module centralizes the binary layout of one account record. The
//! format is explicit rather than a memory-image dump, so it is stable
//! across platforms and languages:
//!
//! | field   | bytes | encoding                         |
//! |---------|-------|----------------------------------|
//! | number  | 4     | u32, big-endian                  |
//! | kind    | 1     | 0 = Savings, 1 = Current         |
//! | active  | 1     | 0 = closed, 1 = active           |
//! | balance | 8     | i64 minor units (2 dp), big-endian |
//! | name    | 100   | UTF-8, NUL-padded                |
//! | phone   | 20    | UTF-8, NUL-padded                |
//! | address | 200   | UTF-8, NUL-padded                |
//!
//! Text longer than its field is truncated on a char boundary; decoding
//! stops at the first NUL. All functions are pure (no I/O) for easy testing.

use crate::types::{Account, AccountKind};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Maximum stored length of the holder name, in bytes
pub const NAME_LEN: usize = 100;
/// Maximum stored length of the phone number, in bytes
pub const PHONE_LEN: usize = 20;
/// Maximum stored length of the address, in bytes
pub const ADDR_LEN: usize = 200;

/// Total size of one record slot, in bytes
pub const RECORD_SIZE: usize = 4 + 1 + 1 + 8 + NAME_LEN + PHONE_LEN + ADDR_LEN;

const KIND_SAVINGS: u8 = 0;
const KIND_CURRENT: u8 = 1;

const NUMBER_RANGE: std::ops::Range<usize> = 0..4;
const KIND_OFFSET: usize = 4;
const ACTIVE_OFFSET: usize = 5;
const BALANCE_RANGE: std::ops::Range<usize> = 6..14;
const NAME_RANGE: std::ops::Range<usize> = 14..14 + NAME_LEN;
const PHONE_RANGE: std::ops::Range<usize> = 114..114 + PHONE_LEN;
const ADDR_RANGE: std::ops::Range<usize> = 134..134 + ADDR_LEN;

/// Encode an account into one fixed-width record
///
/// The balance is rescaled to 2 decimal places and stored as i64 minor
/// units.
///
/// # Errors
///
/// Returns an error message if the balance cannot be represented in i64
/// minor units.
pub fn encode(account: &Account) -> Result<[u8; RECORD_SIZE], String> {
    let minor = to_minor_units(account.balance)
        .ok_or_else(|| format!("balance {} not representable in minor units", account.balance))?;

    let mut buf = [0u8; RECORD_SIZE];
    buf[NUMBER_RANGE].copy_from_slice(&account.number.to_be_bytes());
    buf[KIND_OFFSET] = match account.kind {
        AccountKind::Savings => KIND_SAVINGS,
        AccountKind::Current => KIND_CURRENT,
    };
    buf[ACTIVE_OFFSET] = u8::from(account.active);
    buf[BALANCE_RANGE].copy_from_slice(&minor.to_be_bytes());
    put_text(&mut buf[NAME_RANGE], &account.holder_name);
    put_text(&mut buf[PHONE_RANGE], &account.phone);
    put_text(&mut buf[ADDR_RANGE], &account.address);

    Ok(buf)
}

/// Decode one fixed-width record into an account
///
/// # Errors
///
/// Returns an error message if the slice is not exactly [`RECORD_SIZE`]
/// bytes, the account number is zero, a tag byte is out of range, or a text
/// field is not valid UTF-8.
pub fn decode(bytes: &[u8]) -> Result<Account, String> {
    if bytes.len() != RECORD_SIZE {
        return Err(format!(
            "expected {} bytes, got {}",
            RECORD_SIZE,
            bytes.len()
        ));
    }

    let number = u32::from_be_bytes(
        bytes[NUMBER_RANGE]
            .try_into()
            .map_err(|_| "short number field".to_string())?,
    );
    if number == 0 {
        return Err("account number must be positive".to_string());
    }

    let kind = match bytes[KIND_OFFSET] {
        KIND_SAVINGS => AccountKind::Savings,
        KIND_CURRENT => AccountKind::Current,
        tag => return Err(format!("unknown account type tag {}", tag)),
    };

    let active = match bytes[ACTIVE_OFFSET] {
        0 => false,
        1 => true,
        flag => return Err(format!("invalid active flag {}", flag)),
    };

    let minor = i64::from_be_bytes(
        bytes[BALANCE_RANGE]
            .try_into()
            .map_err(|_| "short balance field".to_string())?,
    );

    Ok(Account {
        number,
        holder_name: take_text(&bytes[NAME_RANGE], "name")?,
        kind,
        balance: Decimal::new(minor, 2),
        phone: take_text(&bytes[PHONE_RANGE], "phone")?,
        address: take_text(&bytes[ADDR_RANGE], "address")?,
        active,
    })
}

/// Rescale a balance to 2 decimal places and convert to i64 minor units
fn to_minor_units(balance: Decimal) -> Option<i64> {
    balance
        .round_dp(2)
        .checked_mul(Decimal::ONE_HUNDRED)?
        .to_i64()
}

/// Copy `text` into a NUL-padded field, truncating on a char boundary
fn put_text(field: &mut [u8], text: &str) {
    let mut end = text.len().min(field.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    field[..end].copy_from_slice(&text.as_bytes()[..end]);
}

/// Read a NUL-padded field back into a String
fn take_text(field: &[u8], name: &str) -> Result<String, String> {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    std::str::from_utf8(&field[..end])
        .map(str::to_string)
        .map_err(|_| format!("{} field is not valid UTF-8", name))
}
