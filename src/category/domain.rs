//! Core category types.

use serde::{Deserialize, Serialize};

/// Database identifier for a category.
pub type CategoryId = i64;

/// A named, colored classification applied to transactions.
///
/// Category names are unique across the whole table, not just within a
/// type; the seed data relies on this to stay idempotent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// The auto-assigned row ID.
    pub id: CategoryId,
    /// The globally unique category name.
    pub name: String,
    /// Either 'income' or 'expense'.
    #[serde(rename = "type")]
    pub category_type: String,
    /// A hex display color, e.g. "#3B82F6".
    pub color: Option<String>,
    /// Creation timestamp, set by the database.
    pub created_at: String,
}

/// The request body for creating a category.
///
/// Fields are passed through to the insert as-is; the UNIQUE name and the
/// type check constraint are the only validation.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    /// The category name, unique across both types.
    #[serde(default)]
    pub name: Option<String>,
    /// Either 'income' or 'expense'.
    #[serde(default, rename = "type")]
    pub category_type: Option<String>,
    /// A hex display color.
    #[serde(default)]
    pub color: Option<String>,
}
