//! Storage module
//!
//! Implementations of the [`CardStore`](crate::core::traits::CardStore)
//! persistence gateway. SQLite is the only backend.

pub mod sqlite;

pub use sqlite::{SqliteCardStore, MEMORY_LOCATION};
