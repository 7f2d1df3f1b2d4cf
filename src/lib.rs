//! Simple Banking System Library
//! # Overview
//!
//! This library provides a single-user banking simulator: it issues accounts
//! with checksummed card numbers and PINs, persists them in a local SQLite
//! database, and lets a logged-in user check the balance, add income, and
//! transfer money to another card.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Card, CardRecord, BankError)
//! - [`cli`] - CLI arguments parsing and the interactive menu loop
//! - [`core`] - Business logic components:
//!   - [`core::checksum`] - Check digit generation and card number validation
//!   - [`core::identity`] - Unique account id and PIN generation
//!   - [`core::account_manager`] - Account opening and balance operations
//!   - [`core::engine`] - Sessions, deposits, and transfers against a store
//! - [`storage`] - The SQLite persistence gateway
//!
//! # Card Numbers
//!
//! A card number is the issuer prefix `400000`, the 9-digit account id, and a
//! Luhn check digit. Transfers are only accepted to numbers that pass the
//! checksum.
//!
//! # Transfers
//!
//! A transfer is checked in a fixed order: not to the source's own card, a
//! valid card number, an existing card, a non-negative amount, and enough
//! funds. Both balance updates are then committed in one transaction.

// Module declarations
pub mod cli;
pub mod core;
pub mod storage;
pub mod types;

pub use crate::core::{BankEngine, CardStore};
pub use storage::SqliteCardStore;
pub use types::{Account, AccountId, BankError, Card, CardNumber, CardRecord, Pin};
