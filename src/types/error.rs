//! Error types for the banking system
//!
//! This module defines all error types that can occur while opening accounts,
//! logging in, and moving money. Errors are designed to be descriptive for log
//! output; the terminal maps them to its own user-facing wording.
//!
//! # Error Categories
//!
//! - **Input Errors**: malformed digits, malformed or negative amounts
//! - **Transfer Errors**: self transfer, bad checksum, unknown card, insufficient funds
//! - **Session Errors**: failed login, account removed underneath the session
//! - **Fatal Errors**: storage and terminal I/O failures

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the banking system
///
/// Every variant except `Storage` and `Io` is recoverable: the terminal
/// reports it and prompts again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// Input that must consist of digits only did not
    #[error("Invalid numeric input '{input}'")]
    InvalidFormat {
        /// The rejected input
        input: String,
    },

    /// Amount is not a non-negative number with at most two decimal places
    #[error("Invalid amount '{amount}'")]
    InvalidAmount {
        /// The rejected amount as entered
        amount: String,
    },

    /// Destination card is the source account's own card
    #[error("Cannot transfer to the source account's own card")]
    SelfTransfer,

    /// Card number has the wrong length or fails the checksum
    #[error("Invalid card number '{number}'")]
    InvalidCardNumber {
        /// The rejected card number
        number: String,
    },

    /// No stored account owns the card number
    #[error("Card {number} not found")]
    CardNotFound {
        /// The card number that was looked up
        number: String,
    },

    /// Transfer amount exceeds the source balance
    #[error("Insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Source balance
        available: Decimal,
        /// Requested transfer amount
        requested: Decimal,
    },

    /// Card number and PIN do not match any stored card
    #[error("Wrong card number or PIN")]
    AuthenticationFailed,

    /// The persisted account no longer exists
    #[error("Account {id} not found")]
    AccountNotFound {
        /// Account id
        id: String,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },

    /// The backing store failed
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error
        message: String,
    },

    /// Reading from or writing to the terminal failed
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },
}

impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::Io {
            message: error.to_string(),
        }
    }
}

impl From<sqlx::Error> for BankError {
    fn from(error: sqlx::Error) -> Self {
        BankError::Storage {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BankError {
    /// Whether the error must end the session
    pub fn is_fatal(&self) -> bool {
        matches!(self, BankError::Storage { .. } | BankError::Io { .. })
    }

    /// Create an InvalidFormat error
    pub fn invalid_format(input: &str) -> Self {
        BankError::InvalidFormat {
            input: input.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str) -> Self {
        BankError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create an InvalidCardNumber error
    pub fn invalid_card_number(number: &str) -> Self {
        BankError::InvalidCardNumber {
            number: number.to_string(),
        }
    }

    /// Create a CardNotFound error
    pub fn card_not_found(number: &str) -> Self {
        BankError::CardNotFound {
            number: number.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(available: Decimal, requested: Decimal) -> Self {
        BankError::InsufficientFunds {
            available,
            requested,
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(id: &str) -> Self {
        BankError::AccountNotFound { id: id.to_string() }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        BankError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }
}
