//! Invoice schema and row type.
//!
//! Invoices are records of emails believed to represent bills or receipts.
//! The schema exists so the Gmail import can land rows here, but no
//! operation in the current build populates or reads the table.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::transaction::TransactionId;

/// Database identifier for an invoice.
pub type InvoiceId = i64;

/// A record of an email believed to represent a bill or receipt.
///
/// Many invoices may eventually reference the one transaction they were
/// reconciled against; the reference is a plain foreign key, not ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// The auto-assigned row ID.
    pub id: InvoiceId,
    /// The source email's message ID.
    pub email_id: Option<String>,
    /// The email subject line.
    pub subject: Option<String>,
    /// The email sender.
    pub sender: Option<String>,
    /// The amount extracted from the email, if any.
    pub amount: Option<f64>,
    /// An ISO-4217-like currency code.
    pub currency: Option<String>,
    /// The email date, string-encoded.
    pub date: Option<String>,
    /// The processing status, 'pending' by default.
    pub status: Option<String>,
    /// The transaction this invoice was matched to, if any.
    pub transaction_id: Option<TransactionId>,
    /// Creation timestamp, set by the database.
    pub created_at: String,
}

/// Initialize the invoices table.
pub fn create_invoice_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS invoices (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email_id TEXT,
            subject TEXT,
            sender TEXT,
            amount REAL,
            currency TEXT DEFAULT 'USD',
            date TEXT,
            status TEXT DEFAULT 'pending',
            transaction_id INTEGER,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (transaction_id) REFERENCES transactions (id)
        );",
    )?;

    Ok(())
}

#[cfg(test)]
mod invoice_table_tests {
    use rusqlite::Connection;

    use crate::db::initialize;

    #[test]
    fn status_defaults_to_pending() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        connection
            .execute(
                "INSERT INTO invoices (email_id, subject) VALUES ('abc123', 'Invoice #1')",
                (),
            )
            .unwrap();

        let status: String = connection
            .query_row("SELECT status FROM invoices WHERE email_id = 'abc123'", [], |row| {
                row.get(0)
            })
            .unwrap();

        assert_eq!(status, "pending");
    }
}
