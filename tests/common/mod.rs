// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use saldo::application::{LedgerService, SubmitInput};
use saldo::domain::TxKind;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Shorthand for raw submit input without a category
pub fn input(kind: TxKind, amount: &str, description: &str) -> SubmitInput {
    SubmitInput {
        kind,
        amount_text: amount.to_string(),
        description: description.to_string(),
        category: None,
    }
}

pub fn income(amount: &str, description: &str) -> SubmitInput {
    input(TxKind::Income, amount, description)
}

pub fn expense(amount: &str, description: &str) -> SubmitInput {
    input(TxKind::Expense, amount, description)
}
