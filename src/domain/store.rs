use std::fmt;

use super::{Cents, Transaction, TransactionPatch, TxId};

/// In-memory ordered collection of transactions, keyed by unique id.
/// Insertion order is preserved; updates happen in place.
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction. Fails if the id is already present.
    pub fn insert(&mut self, tx: Transaction) -> Result<(), StoreError> {
        if self.contains(tx.id) {
            return Err(StoreError::DuplicateId(tx.id));
        }
        self.transactions.push(tx);
        Ok(())
    }

    /// Apply a field patch to the matching record, preserving its id and
    /// its position in the sequence.
    pub fn update(&mut self, id: TxId, patch: TransactionPatch) -> Result<&Transaction, StoreError> {
        let tx = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;

        if let Some(kind) = patch.kind {
            tx.kind = kind;
        }
        if let Some(amount) = patch.amount {
            tx.amount = amount;
        }
        if let Some(description) = patch.description {
            tx.description = description;
        }
        if let Some(category) = patch.category {
            tx.category = Some(category);
        }

        Ok(tx)
    }

    /// Remove the matching record. Removing an absent id is a no-op;
    /// returns whether anything was removed.
    pub fn remove(&mut self, id: TxId) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        self.transactions.len() != before
    }

    pub fn get(&self, id: TxId) -> Result<&Transaction, StoreError> {
        self.transactions
            .iter()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    pub fn contains(&self, id: TxId) -> bool {
        self.transactions.iter().any(|t| t.id == id)
    }

    /// Ordered read-only view of all current transactions.
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Signed sum over a ledger snapshot: income adds, expense subtracts.
pub fn balance(transactions: &[Transaction]) -> Cents {
    transactions
        .iter()
        .fold(0, |acc, tx| acc + tx.signed_amount())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    DuplicateId(TxId),
    NotFound(TxId),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateId(id) => {
                write!(f, "transaction id {} is already in use", id)
            }
            StoreError::NotFound(id) => write!(f, "no transaction with id {}", id),
        }
    }
}

impl std::error::Error for StoreError {}
