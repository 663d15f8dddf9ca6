//! Account schema and row type.
//!
//! Accounts hold the credentials for external integrations. The schema
//! exists ahead of the settings page persisting anything; no operation in
//! the current build populates or reads the table.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// Database identifier for an account.
pub type AccountId = i64;

/// A configured external integration account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// The auto-assigned row ID.
    pub id: AccountId,
    /// The display name of the account.
    pub name: String,
    /// The integration type, e.g. 'wise' or 'gmail'.
    #[serde(rename = "type")]
    pub account_type: String,
    /// The integration's API key or token.
    pub api_key: Option<String>,
    /// The integration's API secret, if it has one.
    pub api_secret: Option<String>,
    /// Whether the account should be used for syncing.
    pub is_active: bool,
    /// Creation timestamp, set by the database.
    pub created_at: String,
}

/// Initialize the accounts table.
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS accounts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            type TEXT NOT NULL,
            api_key TEXT,
            api_secret TEXT,
            is_active BOOLEAN DEFAULT 1,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );",
    )?;

    Ok(())
}

#[cfg(test)]
mod account_table_tests {
    use rusqlite::Connection;

    use crate::db::initialize;

    #[test]
    fn is_active_defaults_to_true() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        connection
            .execute(
                "INSERT INTO accounts (name, type) VALUES ('My Wise account', 'wise')",
                (),
            )
            .unwrap();

        let is_active: bool = connection
            .query_row("SELECT is_active FROM accounts WHERE name = 'My Wise account'", [], |row| {
                row.get(0)
            })
            .unwrap();

        assert!(is_active);
    }
}
