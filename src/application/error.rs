use thiserror::Error;

use crate::domain::TxId;
use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum AppError {
    /// Rejected form input; nothing was mutated.
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Transaction not found: {0}")]
    NotFound(TxId),

    /// Persisted data was unparsable at load time.
    #[error("Stored ledger is corrupted: {0}")]
    CorruptState(String),

    /// Storage read/write failure. The in-memory ledger remains valid;
    /// the latest change may not be durably saved.
    #[error("Storage error: {0}")]
    Persistence(#[source] anyhow::Error),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Corrupt(err) => AppError::CorruptState(err.to_string()),
            StorageError::Io(err) => AppError::Persistence(err),
        }
    }
}
