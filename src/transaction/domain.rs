//! Core transaction types.

use serde::{Deserialize, Serialize};

/// Database identifier for a transaction.
pub type TransactionId = i64;

/// A single recorded money movement, income or expense.
///
/// The amount stores the magnitude only; the semantic sign comes from
/// `type`, which the database constrains to 'income' or 'expense'. The
/// category is a denormalized label with no foreign key to the category
/// table, matching how transactions are entered and displayed today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The auto-assigned row ID.
    pub id: TransactionId,
    /// The calendar date of the transaction, string-encoded.
    pub date: String,
    /// The unsigned amount of money moved.
    pub amount: f64,
    /// An ISO-4217-like currency code, e.g. "USD".
    pub currency: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// The category label, stored as free text.
    pub category: Option<String>,
    /// Either 'income' or 'expense'.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Which integration (or 'manual' entry) produced the transaction.
    pub source: Option<String>,
    /// Creation timestamp, set by the database.
    pub created_at: String,
    /// Update timestamp, set by the database.
    pub updated_at: String,
}

/// The request body for creating a transaction.
///
/// Every field is optional and passed through to the insert as-is; the
/// schema constraints (NOT NULL on date and amount, the type check) are the
/// only validation. A missing `type` or a value outside 'income'/'expense'
/// is rejected by the database, not by the deserializer.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    /// The calendar date of the transaction, string-encoded.
    #[serde(default)]
    pub date: Option<String>,
    /// The unsigned amount of money moved.
    #[serde(default)]
    pub amount: Option<f64>,
    /// An ISO-4217-like currency code.
    #[serde(default)]
    pub currency: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// The category label.
    #[serde(default)]
    pub category: Option<String>,
    /// Either 'income' or 'expense'.
    #[serde(default, rename = "type")]
    pub transaction_type: Option<String>,
    /// Which integration produced the transaction.
    #[serde(default)]
    pub source: Option<String>,
}
