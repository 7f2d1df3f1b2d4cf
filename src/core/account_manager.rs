//! Account management module
//!
//! This module provides the operations on in-memory accounts:
//! - Opening a new account with its card and a zero balance
//! - Crediting and debiting balances with checked arithmetic
//! - Parsing user-entered amounts
//! - Converting balances to and from the stored minor-unit representation
//!
//! Nothing here touches storage; callers persist the results.

use crate::core::checksum::derive_card_number;
use crate::core::identity::{generate_pin, generate_unique_id};
use crate::types::{Account, AccountId, BankError, CardRecord, Pin};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::str::FromStr;

/// Decimal places kept for balances and amounts
pub const AMOUNT_SCALE: u32 = 2;

/// Open a new account with a fresh id, card, and PIN
///
/// The id is unique with respect to `existing_ids`. The account is not
/// persisted.
///
/// # Errors
///
/// Propagates `InvalidFormat` from card number derivation.
pub fn open_account(existing_ids: &HashSet<AccountId>) -> Result<Account, BankError> {
    let id = generate_unique_id(existing_ids);
    issue_account(id, generate_pin())
}

/// Build the zero-balance account for a chosen id and PIN
pub fn issue_account(id: AccountId, pin: Pin) -> Result<Account, BankError> {
    let number = derive_card_number(&id)?;
    Ok(Account::new(id, number, pin, Decimal::ZERO))
}

/// Deposit funds into an account
///
/// # Errors
///
/// Returns an error if:
/// - The amount is negative (`InvalidAmount`)
/// - Adding the amount would overflow (`ArithmeticOverflow`)
pub fn deposit(account: &mut Account, amount: Decimal) -> Result<(), BankError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(BankError::invalid_amount(&amount.to_string()));
    }

    account.balance = account
        .balance
        .checked_add(amount)
        .ok_or_else(|| BankError::arithmetic_overflow("deposit"))?;

    Ok(())
}

/// Withdraw funds from an account
///
/// # Errors
///
/// Returns an error if:
/// - The amount is negative (`InvalidAmount`)
/// - The amount exceeds the balance (`InsufficientFunds`)
pub fn withdraw(account: &mut Account, amount: Decimal) -> Result<(), BankError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(BankError::invalid_amount(&amount.to_string()));
    }

    if account.balance < amount {
        return Err(BankError::insufficient_funds(account.balance, amount));
    }

    account.balance = account
        .balance
        .checked_sub(amount)
        .ok_or_else(|| BankError::arithmetic_overflow("withdrawal"))?;

    Ok(())
}

/// Close an account, yielding the id to remove from storage
pub fn close(account: Account) -> AccountId {
    account.id
}

/// Parse an amount typed by the user
///
/// Accepts non-negative decimal numbers with at most two fractional digits,
/// surrounding whitespace ignored.
///
/// # Errors
///
/// Returns `InvalidAmount` for anything else.
pub fn parse_amount(input: &str) -> Result<Decimal, BankError> {
    let trimmed = input.trim();
    let amount = Decimal::from_str(trimmed).map_err(|_| BankError::invalid_amount(trimmed))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(BankError::invalid_amount(trimmed));
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(BankError::invalid_amount(trimmed));
    }

    Ok(amount)
}

/// Convert an amount to hundredths
///
/// # Errors
///
/// Returns `InvalidAmount` if the amount has more than two fractional digits,
/// `ArithmeticOverflow` if it does not fit the stored integer.
pub fn to_minor_units(amount: Decimal) -> Result<i64, BankError> {
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(BankError::invalid_amount(&amount.to_string()));
    }

    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|minor| minor.to_i64())
        .ok_or_else(|| BankError::arithmetic_overflow("balance conversion"))
}

/// Convert hundredths back to an amount
pub fn from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor, AMOUNT_SCALE)
}

/// Build the stored row for an account
pub fn to_record(account: &Account) -> Result<CardRecord, BankError> {
    Ok(CardRecord {
        id: account.id.clone(),
        number: account.card.number.clone(),
        pin: account.card.pin.clone(),
        balance: to_minor_units(account.balance)?,
    })
}
