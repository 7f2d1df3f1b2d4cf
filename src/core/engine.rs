//! Banking engine
//!
//! This module provides the BankEngine that orchestrates account operations
//! by coordinating the in-memory account model with a CardStore.
//!
//! The engine enforces business rules such as:
//! - Account ids are unique across the store
//! - A session only starts for a matching card number and PIN
//! - Transfers are validated in a fixed order before any balance moves
//! - Both balance updates of a transfer are committed together

use crate::core::account_manager::{self, from_minor_units, to_minor_units, to_record};
use crate::core::checksum::is_valid_card_number;
use crate::core::traits::CardStore;
use crate::types::{Account, BankError};
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Banking engine
///
/// Owns the store handle for the lifetime of the process. Accounts are
/// handed out by value; a session keeps its `Account` and passes it back
/// into each operation.
pub struct BankEngine<S: CardStore> {
    store: S,
}

impl<S: CardStore> BankEngine<S> {
    /// Create a new BankEngine on top of `store`
    pub fn new(store: S) -> Self {
        BankEngine { store }
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Open and persist a new account
    ///
    /// The current id set is read from the store on every call.
    pub async fn open_account(&self) -> Result<Account, BankError> {
        let existing_ids = self.store.find_all_ids().await?;
        let account = account_manager::open_account(&existing_ids)?;

        self.store.insert(&to_record(&account)?).await?;
        info!(account = %account.id, "account opened");

        Ok(account)
    }

    /// Start a session for the card matching `number` and `pin`
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` if no card matches both.
    pub async fn login(&self, number: &str, pin: &str) -> Result<Account, BankError> {
        match self.store.find_by_credentials(number, pin).await? {
            Some(record) => {
                info!(account = %record.id, "logged in");
                Ok(Account::from(record))
            }
            None => {
                warn!(card = %number, "login failed");
                Err(BankError::AuthenticationFailed)
            }
        }
    }

    /// Reload the stored balance of a session account
    pub async fn refresh(&self, account: &mut Account) -> Result<(), BankError> {
        let record = self
            .store
            .find_by_id(&account.id)
            .await?
            .ok_or_else(|| BankError::account_not_found(&account.id))?;

        *account = Account::from(record);
        Ok(())
    }

    /// Add income to an account
    ///
    /// The amount is credited to the stored balance, so income that arrived
    /// since the session loaded the account is kept. The session account
    /// takes the resulting stored balance once the store accepted it.
    pub async fn deposit(&self, account: &mut Account, amount: Decimal) -> Result<(), BankError> {
        let mut updated = account.clone();
        account_manager::deposit(&mut updated, amount)?;

        let balance = self
            .store
            .add_to_balance(&updated.id, to_minor_units(amount)?)
            .await?;
        updated.balance = from_minor_units(balance);
        info!(account = %updated.id, %amount, "income added");

        *account = updated;
        Ok(())
    }

    /// Resolve the destination of a transfer
    ///
    /// Applies the card checks of a transfer, in order:
    /// 1. `SelfTransfer` if `number` is the source's own card
    /// 2. `InvalidCardNumber` if `number` has the wrong length or checksum
    /// 3. `CardNotFound` if no stored account owns `number`
    ///
    /// A rejected destination is logged like a rejected transfer.
    pub async fn check_destination(
        &self,
        source: &Account,
        number: &str,
    ) -> Result<Account, BankError> {
        let result = self.resolve_destination(source, number).await;
        if let Err(e) = &result {
            log_rejection(source, e);
        }
        result
    }

    async fn resolve_destination(
        &self,
        source: &Account,
        number: &str,
    ) -> Result<Account, BankError> {
        if number == source.card.number {
            return Err(BankError::SelfTransfer);
        }

        if !is_valid_card_number(number) {
            return Err(BankError::invalid_card_number(number));
        }

        self.store
            .find_by_number(number)
            .await?
            .map(Account::from)
            .ok_or_else(|| BankError::card_not_found(number))
    }

    /// Transfer `amount` from the session account to the card `destination_number`
    ///
    /// Validation runs the checks of [`check_destination`](Self::check_destination),
    /// then rejects a negative amount with `InvalidAmount` and an amount above
    /// the balance with `InsufficientFunds`. The store rejects a credit that
    /// would overflow the destination with `ArithmeticOverflow`. The first
    /// failing check wins and leaves every balance unchanged.
    ///
    /// On success both balances are committed in one store transaction and
    /// the session account reflects the debit.
    pub async fn transfer(
        &self,
        source: &mut Account,
        destination_number: &str,
        amount: Decimal,
    ) -> Result<(), BankError> {
        let result = self.try_transfer(source, destination_number, amount).await;

        if let Err(e) = &result {
            log_rejection(source, e);
        }

        result
    }

    async fn try_transfer(
        &self,
        source: &mut Account,
        destination_number: &str,
        amount: Decimal,
    ) -> Result<(), BankError> {
        let destination = self.resolve_destination(source, destination_number).await?;

        let mut debited = source.clone();
        account_manager::withdraw(&mut debited, amount)?;

        self.store
            .commit_transfer(&source.id, &destination.id, to_minor_units(amount)?)
            .await
            .map_err(|e| match e {
                BankError::AccountNotFound { id } if id == destination.id => {
                    BankError::card_not_found(destination_number)
                }
                other => other,
            })?;

        info!(
            source = %source.id,
            destination = %destination.id,
            %amount,
            "transfer committed"
        );

        *source = debited;
        Ok(())
    }

    /// Close an account, removing it from the store
    pub async fn close_account(&self, account: Account) -> Result<(), BankError> {
        let id = account_manager::close(account);

        self.store.delete(&id).await?;
        info!(account = %id, "account closed");

        Ok(())
    }

    /// Release the store handle
    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}

fn log_rejection(source: &Account, error: &BankError) {
    if !error.is_fatal() {
        warn!(account = %source.id, reason = %error, "transfer rejected");
    }
}
