//! Core business logic module
//!
//! This module contains the banking components:
//! - `checksum` - Card number check digit generation and validation
//! - `identity` - Unique account id and PIN generation
//! - `account_manager` - Account opening and balance operations
//! - `traits` - The persistence gateway abstraction
//! - `engine` - Orchestration of sessions, deposits, and transfers

pub mod account_manager;
pub mod checksum;
pub mod engine;
pub mod identity;
pub mod traits;

pub use engine::BankEngine;
pub use traits::CardStore;
