//! Database operations for categories, including the default seed data.

use rusqlite::{Connection, Row};

use crate::Error;

use super::domain::{Category, CategoryId, NewCategory};

/// The categories inserted on every start so the category list is never
/// empty. Each entry is `(name, type, color)`.
pub const DEFAULT_CATEGORIES: [(&str, &str, &str); 6] = [
    ("工资收入", "income", "#10B981"),
    ("服务收入", "income", "#3B82F6"),
    ("餐饮", "expense", "#F59E0B"),
    ("交通", "expense", "#EF4444"),
    ("办公用品", "expense", "#8B5CF6"),
    ("软件订阅", "expense", "#06B6D4"),
];

/// Initialize the categories table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            type TEXT CHECK(type IN ('income', 'expense')) NOT NULL,
            color TEXT DEFAULT '#3B82F6',
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );",
    )?;

    Ok(())
}

/// Insert the default categories, ignoring names that already exist.
///
/// Each insert is an independent statement; the seed loop is intentionally
/// not wrapped in a transaction.
pub fn seed_default_categories(connection: &Connection) -> Result<(), Error> {
    for (name, category_type, color) in DEFAULT_CATEGORIES {
        connection.execute(
            "INSERT OR IGNORE INTO categories (name, type, color) VALUES (?1, ?2, ?3)",
            (name, category_type, color),
        )?;
    }

    Ok(())
}

/// Insert a category and return its generated ID.
///
/// # Errors
/// Returns [Error::ConstraintViolation] if `name` already exists anywhere
/// in the table (regardless of type) or if `category_type` is not 'income'
/// or 'expense'.
pub fn create_category(
    new_category: NewCategory,
    connection: &Connection,
) -> Result<CategoryId, Error> {
    connection.execute(
        "INSERT INTO categories (name, type, color) VALUES (?1, ?2, ?3)",
        (
            &new_category.name,
            &new_category.category_type,
            &new_category.color,
        ),
    )?;

    Ok(connection.last_insert_rowid())
}

/// Retrieve every category ordered by `(type, name)`. Under SQLite's
/// default BINARY collation 'expense' sorts before 'income', so expense
/// categories come first, alphabetical within each type.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, type, color, created_at FROM categories ORDER BY type, name;",
        )?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        category_type: row.get(2)?,
        color: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod category_query_tests {
    use rusqlite::Connection;

    use crate::{Error, db::initialize};

    use super::{NewCategory, create_category, get_all_categories};

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        connection
    }

    fn new_category(name: &str, category_type: &str, color: &str) -> NewCategory {
        NewCategory {
            name: Some(name.to_string()),
            category_type: Some(category_type.to_string()),
            color: Some(color.to_string()),
        }
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_db_connection();

        let id = create_category(new_category("Bonus", "income", "#000000"), &connection)
            .expect("Could not create category");

        assert!(id > 0);
    }

    #[test]
    fn create_duplicate_name_fails_and_leaves_table_unchanged() {
        let connection = get_test_db_connection();
        let before = get_all_categories(&connection).unwrap();

        // 餐饮 is part of the seed data.
        let result = create_category(new_category("餐饮", "expense", "#F59E0B"), &connection);

        assert!(matches!(result, Err(Error::ConstraintViolation(_))));
        assert_eq!(get_all_categories(&connection).unwrap(), before);
    }

    #[test]
    fn create_duplicate_name_fails_across_types() {
        let connection = get_test_db_connection();

        // Same name as the seeded expense category, but typed income.
        let result = create_category(new_category("餐饮", "income", "#000000"), &connection);

        assert!(matches!(result, Err(Error::ConstraintViolation(_))));
    }

    #[test]
    fn create_category_rejects_invalid_type() {
        let connection = get_test_db_connection();

        let result = create_category(new_category("Misc", "transfer", "#000000"), &connection);

        assert!(matches!(result, Err(Error::ConstraintViolation(_))));
    }

    #[test]
    fn get_all_categories_groups_by_type_then_sorts_by_name() {
        let connection = get_test_db_connection();
        create_category(new_category("Bonus", "income", "#000000"), &connection).unwrap();

        let categories = get_all_categories(&connection).unwrap();

        assert_eq!(categories.len(), 7);

        // 'expense' < 'income' under the default BINARY collation.
        let first_income_position = categories
            .iter()
            .position(|category| category.category_type == "income")
            .expect("seed data contains income categories");
        let (expense, income) = categories.split_at(first_income_position);

        assert!(expense.iter().all(|c| c.category_type == "expense"));
        assert!(income.iter().all(|c| c.category_type == "income"));
        for window in expense.windows(2) {
            assert!(window[0].name <= window[1].name);
        }
        for window in income.windows(2) {
            assert!(window[0].name <= window[1].name);
        }
    }
}
