//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account, card, and persisted record types
//! - `error`: Error types for the banking system

pub mod account;
pub mod error;

pub use account::{Account, AccountId, Card, CardNumber, CardRecord, Pin};
pub use error::BankError;
