//! SQLite card store
//!
//! `SqliteCardStore` implements [`CardStore`] on a single `card` table. The
//! table is created on open if it does not exist. All accesses go through
//! one pooled connection, matching the single-session model of the terminal.

use crate::core::account_manager::from_minor_units;
use crate::core::traits::CardStore;
use crate::types::{AccountId, BankError, CardRecord};
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Location value selecting a throwaway in-memory database
pub const MEMORY_LOCATION: &str = ":memory:";

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS card (
        id TEXT PRIMARY KEY,
        number TEXT NOT NULL UNIQUE,
        pin TEXT NOT NULL,
        balance INTEGER NOT NULL DEFAULT 0
    )
"#;

/// Card store backed by an SQLite database
pub struct SqliteCardStore {
    pool: SqlitePool,
}

impl SqliteCardStore {
    /// Open the database at `location`, creating file and table as needed
    ///
    /// `":memory:"` opens an in-memory database instead of a file.
    pub async fn open(location: impl AsRef<Path>) -> Result<Self, BankError> {
        let location = location.as_ref();
        if location == Path::new(MEMORY_LOCATION) {
            return Self::in_memory().await;
        }

        let options = SqliteConnectOptions::new()
            .filename(location)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = Self::bootstrap(pool).await?;
        info!(location = %location.display(), "card store opened");
        Ok(store)
    }

    /// Open a private in-memory database
    ///
    /// The single connection is never recycled, since closing it discards
    /// the data.
    pub async fn in_memory() -> Result<Self, BankError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        let store = Self::bootstrap(pool).await?;
        info!("in-memory card store opened");
        Ok(store)
    }

    async fn bootstrap(pool: SqlitePool) -> Result<Self, BankError> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        debug!("card table ready");
        Ok(SqliteCardStore { pool })
    }
}

#[async_trait]
impl CardStore for SqliteCardStore {
    async fn insert(&self, record: &CardRecord) -> Result<(), BankError> {
        sqlx::query("INSERT INTO card (id, number, pin, balance) VALUES (?1, ?2, ?3, ?4)")
            .bind(&record.id)
            .bind(&record.number)
            .bind(&record.pin)
            .bind(record.balance)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_all_ids(&self) -> Result<HashSet<AccountId>, BankError> {
        let ids = sqlx::query_scalar::<_, String>("SELECT id FROM card")
            .fetch(&self.pool)
            .try_collect::<HashSet<String>>()
            .await?;
        Ok(ids)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<CardRecord>, BankError> {
        let record = sqlx::query_as::<_, CardRecord>(
            "SELECT id, number, pin, balance FROM card WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn find_by_number(&self, number: &str) -> Result<Option<CardRecord>, BankError> {
        let record = sqlx::query_as::<_, CardRecord>(
            "SELECT id, number, pin, balance FROM card WHERE number = ?1",
        )
        .bind(number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn find_by_credentials(
        &self,
        number: &str,
        pin: &str,
    ) -> Result<Option<CardRecord>, BankError> {
        let record = sqlx::query_as::<_, CardRecord>(
            "SELECT id, number, pin, balance FROM card WHERE number = ?1 AND pin = ?2",
        )
        .bind(number)
        .bind(pin)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn update_balance(&self, id: &str, balance: i64) -> Result<(), BankError> {
        let result = sqlx::query("UPDATE card SET balance = ?1 WHERE id = ?2")
            .bind(balance)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BankError::account_not_found(id));
        }
        Ok(())
    }

    async fn commit_transfer(
        &self,
        source_id: &str,
        destination_id: &str,
        amount: i64,
    ) -> Result<(), BankError> {
        let mut tx = self.pool.begin().await?;

        let available = sqlx::query_scalar::<_, i64>("SELECT balance FROM card WHERE id = ?1")
            .bind(source_id)
            .fetch_optional(&mut *tx)
            .await?;
        let available = match available {
            Some(balance) => balance,
            None => {
                tx.rollback().await?;
                return Err(BankError::account_not_found(source_id));
            }
        };
        if available < amount {
            tx.rollback().await?;
            return Err(BankError::insufficient_funds(
                from_minor_units(available),
                from_minor_units(amount),
            ));
        }

        let held = sqlx::query_scalar::<_, i64>("SELECT balance FROM card WHERE id = ?1")
            .bind(destination_id)
            .fetch_optional(&mut *tx)
            .await?;
        match held.map(|balance| balance.checked_add(amount)) {
            None => {
                tx.rollback().await?;
                return Err(BankError::account_not_found(destination_id));
            }
            Some(None) => {
                tx.rollback().await?;
                return Err(BankError::arithmetic_overflow("transfer"));
            }
            Some(Some(_)) => {}
        }

        sqlx::query("UPDATE card SET balance = balance - ?1 WHERE id = ?2")
            .bind(amount)
            .bind(source_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE card SET balance = balance + ?1 WHERE id = ?2")
            .bind(amount)
            .bind(destination_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn add_to_balance(&self, id: &str, amount: i64) -> Result<i64, BankError> {
        let mut tx = self.pool.begin().await?;

        let held = sqlx::query_scalar::<_, i64>("SELECT balance FROM card WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(held) = held else {
            tx.rollback().await?;
            return Err(BankError::account_not_found(id));
        };
        let Some(balance) = held.checked_add(amount) else {
            tx.rollback().await?;
            return Err(BankError::arithmetic_overflow("deposit"));
        };

        sqlx::query("UPDATE card SET balance = ?1 WHERE id = ?2")
            .bind(balance)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(balance)
    }

    async fn delete(&self, id: &str) -> Result<(), BankError> {
        let result = sqlx::query("DELETE FROM card WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BankError::account_not_found(id));
        }
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
