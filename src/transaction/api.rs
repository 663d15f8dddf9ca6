//! JSON API handlers for transactions.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error};

use super::{
    db::{create_transaction, get_recent_transactions},
    domain::{NewTransaction, Transaction, TransactionId},
};

/// The response body for `GET /api/transactions`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionListResponse {
    /// The most recent transactions, newest first.
    pub transactions: Vec<Transaction>,
}

/// The response body for a successful `POST /api/transactions`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionCreatedResponse {
    /// The generated row ID.
    pub id: TransactionId,
    /// A human-readable confirmation.
    pub message: String,
}

/// Handle `GET /api/transactions`: the newest 100 transactions.
pub async fn get_transactions_endpoint(State(state): State<AppState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response("Failed to fetch transactions");
        }
    };

    match get_recent_transactions(&connection) {
        Ok(transactions) => Json(TransactionListResponse { transactions }).into_response(),
        Err(error) => error.into_api_response("Failed to fetch transactions"),
    }
}

/// Handle `POST /api/transactions`: insert one transaction.
pub async fn create_transaction_endpoint(
    State(state): State<AppState>,
    Json(new_transaction): Json<NewTransaction>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response("Failed to create transaction");
        }
    };

    match create_transaction(new_transaction, &connection) {
        Ok(id) => Json(TransactionCreatedResponse {
            id,
            message: "Transaction created successfully".to_string(),
        })
        .into_response(),
        Err(error) => error.into_api_response("Failed to create transaction"),
    }
}

#[cfg(test)]
mod transaction_api_tests {
    use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;

    use crate::{AppState, transaction::NewTransaction};

    use super::{create_transaction_endpoint, get_transactions_endpoint};

    fn get_test_state() -> AppState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        AppState::new(connection).expect("Could not create app state")
    }

    #[tokio::test]
    async fn create_then_list_round_trips() {
        let state = get_test_state();
        let new_transaction = NewTransaction {
            date: Some("2024-01-01".to_string()),
            amount: Some(100.0),
            currency: Some("USD".to_string()),
            description: Some("Salary".to_string()),
            category: Some("工资收入".to_string()),
            transaction_type: Some("income".to_string()),
            source: Some("manual".to_string()),
        };

        let response = create_transaction_endpoint(State(state.clone()), Json(new_transaction))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = get_transactions_endpoint(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_with_bad_type_returns_conflict() {
        let state = get_test_state();
        let new_transaction = NewTransaction {
            date: Some("2024-01-01".to_string()),
            amount: Some(1.0),
            transaction_type: Some("refund".to_string()),
            ..Default::default()
        };

        let response = create_transaction_endpoint(State(state), Json(new_transaction))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
