//! The dashboard page: summary cards and the recent transaction table.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, endpoints,
    html::{
        CARD_LABEL_STYLE, CARD_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    transaction::{Transaction, get_recent_transactions},
};

/// Income, expense, and balance totals over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Totals {
    income: f64,
    expenses: f64,
    balance: f64,
}

/// Sum the income and expense amounts of `transactions`.
///
/// Transactions with any other type value are ignored. The balance is
/// income minus expenses, so it goes negative when spending exceeds income.
fn calculate_totals(transactions: &[Transaction]) -> Totals {
    let mut income = 0.0;
    let mut expenses = 0.0;

    for transaction in transactions {
        match transaction.transaction_type.as_str() {
            "income" => income += transaction.amount,
            "expense" => expenses += transaction.amount,
            _ => {}
        }
    }

    Totals {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// Display an overview of the user's finances: totals for the most recent
/// transactions and a table listing them.
pub async fn get_dashboard_page(State(state): State<AppState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return error_view().into_response();
        }
    };

    let transactions = match get_recent_transactions(&connection) {
        Ok(transactions) => transactions,
        Err(error) => {
            tracing::error!("could not fetch transactions for dashboard: {error}");
            return error_view().into_response();
        }
    };

    let totals = calculate_totals(&transactions);
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    dashboard_view(nav_bar, &totals, &transactions).into_response()
}

fn dashboard_view(nav_bar: NavBar<'_>, totals: &Totals, transactions: &[Transaction]) -> Markup {
    let content = html! {
        (nav_bar.into_html())

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl"
            {
                h1 class="text-2xl font-bold mb-6" { "Dashboard" }

                div class="grid grid-cols-1 sm:grid-cols-3 gap-4 mb-8"
                {
                    (summary_card("Total Income", totals.income, "text-green-600 dark:text-green-400"))
                    (summary_card("Total Expenses", totals.expenses, "text-red-600 dark:text-red-400"))
                    (summary_card("Balance", totals.balance, "text-gray-900 dark:text-white"))
                }

                h2 class="text-xl font-semibold mb-4" { "Recent Transactions" }

                @if transactions.is_empty() {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "No transactions yet. Add one through the API or connect an account in Settings."
                    }
                } @else {
                    (transaction_table(transactions))
                }
            }
        }
    };

    base("Dashboard", &content)
}

fn summary_card(label: &str, amount: f64, amount_style: &str) -> Markup {
    html! {
        div class=(CARD_STYLE)
        {
            p class=(CARD_LABEL_STYLE) { (label) }
            p class={ "text-2xl font-bold " (amount_style) } { (format_currency(amount)) }
        }
    }
}

fn transaction_table(transactions: &[Transaction]) -> Markup {
    html! {
        div class="relative overflow-x-auto shadow rounded-lg"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                    }
                }

                tbody
                {
                    @for transaction in transactions
                    {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (transaction.date) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                (transaction.description.as_deref().unwrap_or(""))
                            }
                            td class=(TABLE_CELL_STYLE)
                            {
                                (transaction.category.as_deref().unwrap_or("Uncategorized"))
                            }
                            td class=(TABLE_CELL_STYLE) { (transaction.transaction_type) }
                            td class=(TABLE_CELL_STYLE) { (format_currency(transaction.amount)) }
                        }
                    }
                }
            }
        }
    }
}

fn error_view() -> Response {
    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-4" { "Something went wrong" }
            p { "The dashboard could not be loaded. Try again later or check the server logs." }
        }
    };

    (StatusCode::INTERNAL_SERVER_ERROR, base("Error", &content)).into_response()
}


#[cfg(test)]
mod dashboard_page_tests {
    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;

    use crate::{
        AppState,
        transaction::{NewTransaction, create_transaction},
    };

    use super::get_dashboard_page;

    fn get_test_state() -> AppState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        AppState::new(connection).expect("Could not create app state")
    }

    fn new_transaction(amount: f64, transaction_type: &str, description: &str) -> NewTransaction {
        NewTransaction {
            date: Some("2024-01-15".to_string()),
            amount: Some(amount),
            currency: Some("USD".to_string()),
            description: Some(description.to_string()),
            category: Some("餐饮".to_string()),
            transaction_type: Some(transaction_type.to_string()),
            source: Some("manual".to_string()),
        }
    }

    async fn render_page(state: AppState) -> (StatusCode, String) {
        let response = get_dashboard_page(State(state)).await.into_response();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not read response body");

        (status, String::from_utf8_lossy(&body_bytes).into_owned())
    }

    #[tokio::test]
    async fn renders_totals_and_transaction_rows() {
        let state = get_test_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_transaction(new_transaction(1000.0, "income", "Salary"), &connection).unwrap();
            create_transaction(new_transaction(250.0, "expense", "Groceries"), &connection)
                .unwrap();
        }

        let (status, body) = render_page(state).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("$1000.00"), "income total should be rendered");
        assert!(body.contains("$250.00"), "expense total should be rendered");
        assert!(body.contains("$750.00"), "balance should be rendered");
        assert!(body.contains("Salary"));
        assert!(body.contains("Groceries"));
    }

    #[tokio::test]
    async fn empty_database_shows_hint_instead_of_table() {
        let (status, body) = render_page(get_test_state()).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No transactions yet"));
    }
}
