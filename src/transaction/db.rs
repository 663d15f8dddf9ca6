//! Database operations for transactions.

use rusqlite::{Connection, Row};

use crate::Error;

use super::domain::{NewTransaction, Transaction, TransactionId};

/// The maximum number of rows returned by [get_recent_transactions].
///
/// This hard limit is the only bound on the query; there is no pagination
/// cursor.
pub const RECENT_TRANSACTION_LIMIT: usize = 100;

/// Initialize the transactions table.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            amount REAL NOT NULL,
            currency TEXT DEFAULT 'USD',
            description TEXT,
            category TEXT,
            type TEXT CHECK(type IN ('income', 'expense')) NOT NULL,
            source TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );",
    )?;

    Ok(())
}

/// Insert a transaction and return its generated ID.
///
/// # Errors
/// Returns [Error::ConstraintViolation] if `transaction_type` is not
/// 'income' or 'expense', or if a NOT NULL column is missing.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<TransactionId, Error> {
    connection.execute(
        "INSERT INTO transactions (date, amount, currency, description, category, type, source)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        (
            &new_transaction.date,
            &new_transaction.amount,
            &new_transaction.currency,
            &new_transaction.description,
            &new_transaction.category,
            &new_transaction.transaction_type,
            &new_transaction.source,
        ),
    )?;

    Ok(connection.last_insert_rowid())
}

/// Retrieve the most recent transactions, newest date first.
///
/// Returns at most [RECENT_TRANSACTION_LIMIT] rows and an empty vec when
/// the table is empty.
pub fn get_recent_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!(
            "SELECT id, date, amount, currency, description, category, type, source, \
            created_at, updated_at FROM transactions \
            ORDER BY date DESC LIMIT {RECENT_TRANSACTION_LIMIT}"
        ))?
        .query_map([], map_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        date: row.get(1)?,
        amount: row.get(2)?,
        currency: row.get(3)?,
        description: row.get(4)?,
        category: row.get(5)?,
        transaction_type: row.get(6)?,
        source: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

#[cfg(test)]
mod transaction_query_tests {
    use rusqlite::Connection;

    use crate::{Error, db::initialize, transaction::NewTransaction};

    use super::{RECENT_TRANSACTION_LIMIT, create_transaction, get_recent_transactions};

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        connection
    }

    fn new_transaction(date: &str, amount: f64, transaction_type: &str) -> NewTransaction {
        NewTransaction {
            date: Some(date.to_string()),
            amount: Some(amount),
            currency: Some("USD".to_string()),
            description: Some("test".to_string()),
            category: Some("餐饮".to_string()),
            transaction_type: Some(transaction_type.to_string()),
            source: Some("manual".to_string()),
        }
    }

    #[test]
    fn create_transaction_succeeds() {
        let connection = get_test_db_connection();

        let id = create_transaction(new_transaction("2024-01-01", 100.0, "income"), &connection)
            .expect("Could not create transaction");

        assert!(id > 0);

        let transactions = get_recent_transactions(&connection).unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].id, id);
        assert_eq!(transactions[0].date, "2024-01-01");
        assert_eq!(transactions[0].amount, 100.0);
        assert_eq!(transactions[0].transaction_type, "income");
    }

    #[test]
    fn create_transaction_rejects_invalid_type() {
        let connection = get_test_db_connection();

        let result = create_transaction(new_transaction("2024-01-01", 1.0, "refund"), &connection);

        assert!(matches!(result, Err(Error::ConstraintViolation(_))));

        let transactions = get_recent_transactions(&connection).unwrap();
        assert!(transactions.is_empty(), "no row should have been inserted");
    }

    #[test]
    fn create_transaction_rejects_missing_date() {
        let connection = get_test_db_connection();
        let mut transaction = new_transaction("2024-01-01", 1.0, "expense");
        transaction.date = None;

        let result = create_transaction(transaction, &connection);

        assert!(matches!(result, Err(Error::ConstraintViolation(_))));
    }

    #[test]
    fn get_recent_transactions_returns_empty_vec_for_empty_table() {
        let connection = get_test_db_connection();

        let transactions = get_recent_transactions(&connection).unwrap();

        assert_eq!(transactions, vec![]);
    }

    #[test]
    fn get_recent_transactions_caps_at_limit_and_orders_by_date_descending() {
        let connection = get_test_db_connection();

        // 101 rows with distinct, lexicographically ordered dates.
        for year in 1900..=2000 {
            create_transaction(
                new_transaction(&format!("{year}-01-01"), 1.0, "expense"),
                &connection,
            )
            .unwrap();
        }

        let transactions = get_recent_transactions(&connection).unwrap();

        assert_eq!(transactions.len(), RECENT_TRANSACTION_LIMIT);
        assert_eq!(transactions[0].date, "2000-01-01");
        assert_eq!(transactions[99].date, "1901-01-01");
        for window in transactions.windows(2) {
            assert!(
                window[0].date >= window[1].date,
                "{} should sort before {}",
                window[0].date,
                window[1].date
            );
        }
    }
}
