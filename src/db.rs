//! Database initialization for the application schema.
//!
//! There is no migration mechanism: tables are created with
//! `CREATE TABLE IF NOT EXISTS` and existing schemas are never altered.
//! Schema changes in a future version are a known limitation.

use rusqlite::Connection;

use crate::{
    Error,
    account::create_account_table,
    category::{create_category_table, seed_default_categories},
    invoice::create_invoice_table,
    transaction::create_transaction_table,
};

/// Create the application tables and seed data if they do not exist.
///
/// This function is idempotent: it is called on every process start and
/// never drops or modifies existing rows. The default categories are
/// inserted with an insert-or-ignore policy keyed on the unique category
/// name, so re-running cannot duplicate them.
///
/// # Errors
/// Returns an error if a table cannot be created or the seed data cannot be
/// inserted.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_transaction_table(connection)?;
    create_invoice_table(connection)?;
    create_account_table(connection)?;
    create_category_table(connection)?;

    seed_default_categories(connection)?;

    Ok(())
}
