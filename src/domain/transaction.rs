use serde::{Deserialize, Serialize};

use super::Cents;

pub type TxId = i64;

/// Whether an entry adds to or subtracts from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(TxKind::Income),
            "expense" => Some(TxKind::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed category set for budgeting and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Salary,
    Groceries,
    Dining,
    Transport,
    Utilities,
    Entertainment,
    Health,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Salary,
        Category::Groceries,
        Category::Dining,
        Category::Transport,
        Category::Utilities,
        Category::Entertainment,
        Category::Health,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Salary => "salary",
            Category::Groceries => "groceries",
            Category::Dining => "dining",
            Category::Transport => "transport",
            Category::Utilities => "utilities",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let wanted = s.to_lowercase();
        Category::ALL.into_iter().find(|c| c.as_str() == wanted)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single income or expense entry. The id is assigned once, at creation,
/// and never changes. Field declaration order is the canonical serialized
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TxId,
    pub kind: TxKind,
    /// Amount in cents, always positive; the sign comes from `kind`
    pub amount: Cents,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Transaction {
    pub fn new(id: TxId, kind: TxKind, amount: Cents, description: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            amount,
            description: description.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Contribution of this entry to the running balance.
    pub fn signed_amount(&self) -> Cents {
        match self.kind {
            TxKind::Income => self.amount,
            TxKind::Expense => -self.amount,
        }
    }
}

/// Field-wise patch applied by `TransactionStore::update`. A `None` field
/// keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub kind: Option<TxKind>,
    pub amount: Option<Cents>,
    pub description: Option<String>,
    pub category: Option<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [TxKind::Income, TxKind::Expense] {
            assert_eq!(TxKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(TxKind::from_str("Income"), Some(TxKind::Income));
        assert_eq!(TxKind::from_str("transfer"), None);
    }

    #[test]
    fn test_category_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_str("bogus"), None);
    }

    #[test]
    fn test_signed_amount() {
        let income = Transaction::new(1, TxKind::Income, 10000, "Salary");
        let expense = Transaction::new(2, TxKind::Expense, 3000, "Lunch");

        assert_eq!(income.signed_amount(), 10000);
        assert_eq!(expense.signed_amount(), -3000);
    }

    #[test]
    fn test_canonical_serialized_form() {
        let tx = Transaction::new(1, TxKind::Income, 10000, "Salary")
            .with_category(Category::Salary);

        let json = serde_json::to_string(&tx).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"kind":"income","amount":10000,"description":"Salary","category":"salary"}"#
        );
    }

    #[test]
    fn test_category_omitted_when_absent() {
        let tx = Transaction::new(2, TxKind::Expense, 3000, "Lunch");

        let json = serde_json::to_string(&tx).unwrap();
        assert_eq!(
            json,
            r#"{"id":2,"kind":"expense","amount":3000,"description":"Lunch"}"#
        );

        let parsed: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tx);
    }
}
