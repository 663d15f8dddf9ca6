//! The application's error taxonomy and its mapping onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The database rejected a write because it violated a schema constraint,
    /// e.g. a transaction type outside of 'income'/'expense' or a duplicate
    /// category name.
    #[error("a database constraint rejected the data: {0}")]
    ConstraintViolation(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A request to an external API failed.
    ///
    /// The original status code and error are logged where the failure
    /// happens; callers only see which upstream service failed.
    #[error("request to the {0} API failed")]
    UpstreamFailure(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(sql_error, Some(description))
                if sql_error.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Error::ConstraintViolation(description)
            }
            rusqlite::Error::SqliteFailure(sql_error, None)
                if sql_error.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Error::ConstraintViolation(sql_error.to_string())
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// The HTTP status code that the error maps to.
    ///
    /// Constraint violations, missing resources, and upstream failures get
    /// distinct codes so that clients can tell them apart even though the
    /// response body carries the same generic message for each endpoint.
    fn status_code(&self) -> StatusCode {
        match self {
            Error::ConstraintViolation(_) => StatusCode::CONFLICT,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::UpstreamFailure(_) => StatusCode::BAD_GATEWAY,
            Error::DatabaseLockError | Error::SqlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert the error into a JSON `{"error": ...}` response.
    ///
    /// `message` is the generic client-facing text, e.g. "Failed to fetch
    /// transactions". The underlying error is logged and not sent to the
    /// client.
    pub(crate) fn into_api_response(self, message: &str) -> Response {
        tracing::error!("{message}: {self}");

        (self.status_code(), Json(json!({ "error": message }))).into_response()
    }
}
