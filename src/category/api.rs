//! JSON API handlers for categories.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error};

use super::{
    db::{create_category, get_all_categories},
    domain::{Category, CategoryId, NewCategory},
};

/// The response body for `GET /api/categories`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryListResponse {
    /// Every category, ordered by type then name.
    pub categories: Vec<Category>,
}

/// The response body for a successful `POST /api/categories`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryCreatedResponse {
    /// The generated row ID.
    pub id: CategoryId,
    /// A human-readable confirmation.
    pub message: String,
}

/// Handle `GET /api/categories`: every category ordered by `(type, name)`.
pub async fn get_categories_endpoint(State(state): State<AppState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response("Failed to fetch categories");
        }
    };

    match get_all_categories(&connection) {
        Ok(categories) => Json(CategoryListResponse { categories }).into_response(),
        Err(error) => error.into_api_response("Failed to fetch categories"),
    }
}

/// Handle `POST /api/categories`: insert one category.
pub async fn create_category_endpoint(
    State(state): State<AppState>,
    Json(new_category): Json<NewCategory>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response("Failed to create category");
        }
    };

    match create_category(new_category, &connection) {
        Ok(id) => Json(CategoryCreatedResponse {
            id,
            message: "Category created successfully".to_string(),
        })
        .into_response(),
        Err(error) => error.into_api_response("Failed to create category"),
    }
}
