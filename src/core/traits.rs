//! Core traits for account persistence
//!
//! This module defines the persistence gateway the engine talks to. Every
//! query is parameterized; user input never becomes query text.

use crate::types::{AccountId, BankError, CardRecord};
use async_trait::async_trait;
use std::collections::HashSet;

/// Trait for storing and retrieving card records
///
/// Implementations map storage failures to `BankError::Storage` and report
/// a missing row as the matching domain error where documented.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Insert a freshly opened account
    async fn insert(&self, record: &CardRecord) -> Result<(), BankError>;

    /// Get the ids of all stored accounts
    async fn find_all_ids(&self) -> Result<HashSet<AccountId>, BankError>;

    /// Get an account by id
    async fn find_by_id(&self, id: &str) -> Result<Option<CardRecord>, BankError>;

    /// Get the account owning a card number
    async fn find_by_number(&self, number: &str) -> Result<Option<CardRecord>, BankError>;

    /// Get the account matching both card number and PIN
    async fn find_by_credentials(
        &self,
        number: &str,
        pin: &str,
    ) -> Result<Option<CardRecord>, BankError>;

    /// Set the balance of an account, in hundredths
    ///
    /// Fails with `AccountNotFound` if no row has the id.
    async fn update_balance(&self, id: &str, balance: i64) -> Result<(), BankError>;

    /// Add `amount` hundredths to the stored balance of an account
    ///
    /// Returns the new stored balance. Fails with `AccountNotFound` if no row
    /// has the id and with `ArithmeticOverflow` if the sum does not fit.
    async fn add_to_balance(&self, id: &str, amount: i64) -> Result<i64, BankError>;

    /// Move `amount` hundredths from one account to another atomically
    ///
    /// Either both balances change or neither does. Fails with
    /// `InsufficientFunds` if the stored source balance is below `amount`,
    /// with `ArithmeticOverflow` if the credit does not fit the destination,
    /// and with `AccountNotFound` naming whichever row is missing.
    async fn commit_transfer(
        &self,
        source_id: &str,
        destination_id: &str,
        amount: i64,
    ) -> Result<(), BankError>;

    /// Remove an account
    ///
    /// Fails with `AccountNotFound` if no row has the id.
    async fn delete(&self, id: &str) -> Result<(), BankError>;

    /// Release the underlying handle
    async fn close(&self);
}
