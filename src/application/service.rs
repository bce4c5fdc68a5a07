use tracing::{debug, info};

use crate::domain::{
    balance, parse_cents, Category, Cents, EditSession, Transaction, TransactionPatch,
    TransactionStore, TxId, TxKind,
};
use crate::storage::PersistenceGateway;

use super::AppError;

/// Raw form input for creating or updating a transaction. The amount
/// arrives as typed text; parsing and validation happen in `submit`.
#[derive(Debug, Clone)]
pub struct SubmitInput {
    pub kind: TxKind,
    pub amount_text: String,
    pub description: String,
    pub category: Option<Category>,
}

/// Application service owning the ledger state: the transaction store, the
/// edit session, the id counter, and the persistence gateway. This is the
/// primary interface for any client (CLI, TUI, API, etc.); clients render
/// and collect input but never own the data.
pub struct LedgerService {
    store: TransactionStore,
    session: EditSession,
    gateway: PersistenceGateway,
    next_id: TxId,
}

impl LedgerService {
    /// Initialize a new ledger database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let gateway = PersistenceGateway::init(&db_url).await?;
        Self::from_gateway(gateway).await
    }

    /// Open an existing ledger database.
    pub async fn open(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let gateway = PersistenceGateway::connect(&db_url).await?;
        Self::from_gateway(gateway).await
    }

    /// Seed the in-memory store from persisted state. The id counter
    /// starts strictly above every persisted id.
    async fn from_gateway(gateway: PersistenceGateway) -> Result<Self, AppError> {
        let transactions = gateway.load().await?;
        let next_id = transactions
            .iter()
            .map(|tx| tx.id)
            .max()
            .map_or(1, |id| id + 1);

        let mut store = TransactionStore::new();
        for tx in transactions {
            store
                .insert(tx)
                .map_err(|err| AppError::CorruptState(err.to_string()))?;
        }

        debug!(entries = store.len(), next_id, "ledger opened");
        Ok(Self {
            store,
            session: EditSession::Idle,
            gateway,
            next_id,
        })
    }

    /// Validate raw input, then create a new transaction or update the one
    /// under edit, depending on the current session. The in-memory change
    /// is applied before the save; a persistence failure is reported but
    /// does not roll it back.
    pub async fn submit(&mut self, input: SubmitInput) -> Result<Transaction, AppError> {
        let amount = parse_amount(&input.amount_text)?;
        let description = input.description.trim();
        if description.is_empty() {
            return Err(AppError::Validation(
                "Description must not be empty".to_string(),
            ));
        }
        let description = description.to_string();

        let tx = match self.session.editing() {
            Some(id) => {
                let patch = TransactionPatch {
                    kind: Some(input.kind),
                    amount: Some(amount),
                    description: Some(description),
                    category: input.category,
                };
                let tx = self
                    .store
                    .update(id, patch)
                    .map_err(|_| AppError::NotFound(id))?
                    .clone();
                self.session.reset();
                info!(id, "transaction updated");
                tx
            }
            None => {
                let tx = self.insert_new(input.kind, amount, description, input.category);
                info!(id = tx.id, "transaction added");
                tx
            }
        };

        self.gateway.save(self.store.all()).await?;
        Ok(tx)
    }

    /// Allocate the next id and append. The counter only moves forward, so
    /// every issued id is strictly greater than any before it; a collision
    /// with a loaded id is retried with a fresh one, never surfaced.
    fn insert_new(
        &mut self,
        kind: TxKind,
        amount: Cents,
        description: String,
        category: Option<Category>,
    ) -> Transaction {
        let mut id = self.next_id;
        loop {
            let tx = Transaction {
                id,
                kind,
                amount,
                description: description.clone(),
                category,
            };
            let snapshot = tx.clone();
            if self.store.insert(tx).is_ok() {
                self.next_id = id + 1;
                return snapshot;
            }
            id += 1;
        }
    }

    /// Load a transaction for editing and point the session at it. The
    /// returned values are meant to pre-fill the client's input state.
    pub fn request_edit(&mut self, id: TxId) -> Result<Transaction, AppError> {
        let tx = self
            .store
            .get(id)
            .map_err(|_| AppError::NotFound(id))?
            .clone();
        self.session.begin(id);
        debug!(id, "edit session started");
        Ok(tx)
    }

    /// Remove a transaction and persist. Confirmation is the caller's
    /// concern; this method assumes it was given. Deleting the id under
    /// edit resets the session.
    pub async fn request_delete(&mut self, id: TxId) -> Result<(), AppError> {
        if !self.store.remove(id) {
            return Err(AppError::NotFound(id));
        }
        if self.session.editing() == Some(id) {
            self.session.reset();
        }
        info!(id, "transaction deleted");
        self.gateway.save(self.store.all()).await?;
        Ok(())
    }

    /// Abandon the current edit session. Never touches the store.
    pub fn cancel(&mut self) {
        self.session.reset();
    }

    /// Recompute the balance as a pure fold over the current ledger.
    pub fn compute_balance(&self) -> Cents {
        balance(self.store.all())
    }

    /// Ordered view of the current ledger.
    pub fn transactions(&self) -> &[Transaction] {
        self.store.all()
    }

    /// Current edit session state.
    pub fn session(&self) -> EditSession {
        self.session
    }
}

/// Parse submitted amount text into strictly positive cents.
fn parse_amount(text: &str) -> Result<Cents, AppError> {
    let cents = parse_cents(text).map_err(|err| {
        AppError::Validation(format!("Invalid amount '{}': {}", text.trim(), err))
    })?;
    if cents <= 0 {
        return Err(AppError::Validation(
            "Amount must be positive".to_string(),
        ));
    }
    Ok(cents)
}
