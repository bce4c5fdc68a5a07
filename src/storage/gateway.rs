use anyhow::Context;
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use tracing::debug;

use crate::domain::Transaction;

use super::MIGRATION_001_INITIAL;

/// Storage key for the serialized ledger. The sole unit of persisted state.
pub const LEDGER_SLOT: &str = "transactions";

#[derive(Error, Debug)]
pub enum StorageError {
    /// The slot exists but its contents are not a valid ledger. Surfaced
    /// rather than replaced with an empty ledger, which would be invisible
    /// data loss.
    #[error("Stored ledger is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

/// Gateway for persisting the transaction collection to a single named
/// slot in a local key-value store (SQLite).
pub struct PersistenceGateway {
    pool: SqlitePool,
}

impl PersistenceGateway {
    /// Create a new gateway over the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Create the kv table. Safe to run repeatedly.
    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self, StorageError> {
        let gateway = Self::connect(database_url).await?;
        gateway.migrate().await?;
        Ok(gateway)
    }

    /// Serialize the ordered sequence and write it under the ledger slot,
    /// fully replacing any prior value.
    pub async fn save(&self, transactions: &[Transaction]) -> Result<(), StorageError> {
        let value =
            serde_json::to_string(transactions).context("Failed to serialize ledger")?;

        sqlx::query("INSERT OR REPLACE INTO kv (slot, value) VALUES (?, ?)")
            .bind(LEDGER_SLOT)
            .bind(&value)
            .execute(&self.pool)
            .await
            .context("Failed to write ledger slot")?;

        debug!(entries = transactions.len(), "ledger saved");
        Ok(())
    }

    /// Read the ledger slot. An absent slot is the expected first-run
    /// state and yields an empty ledger.
    pub async fn load(&self) -> Result<Vec<Transaction>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv WHERE slot = ?")
            .bind(LEDGER_SLOT)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to read ledger slot")?;

        match row {
            Some(row) => {
                let value: String = row.get("value");
                let transactions: Vec<Transaction> = serde_json::from_str(&value)?;
                debug!(entries = transactions.len(), "ledger loaded");
                Ok(transactions)
            }
            None => Ok(Vec::new()),
        }
    }
}
