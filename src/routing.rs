//! Application router configuration.

use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use maud::html;
use serde_json::json;

use crate::{
    AppState,
    category::{create_category_endpoint, get_categories_endpoint},
    dashboard::get_dashboard_page,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    settings::{get_settings_page, save_settings_endpoint},
    transaction::{create_transaction_endpoint, get_transactions_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::SETTINGS_VIEW, get(get_settings_page))
        .route(endpoints::SETTINGS_API, post(save_settings_endpoint))
        .route(
            endpoints::TRANSACTIONS_API,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::CATEGORIES_API,
            get(get_categories_endpoint).post(create_category_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Serve a 404 response: JSON for API paths, an HTML page otherwise.
async fn get_404_not_found(uri: Uri) -> Response {
    if uri.path().starts_with("/api/") {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response();
    }

    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="mb-4 text-7xl tracking-tight font-extrabold text-blue-600 dark:text-blue-500"
            {
                "404"
            }

            p class="mb-4 text-3xl tracking-tight font-bold" { "Page not found" }

            a href=(endpoints::DASHBOARD_VIEW) class="text-blue-600 hover:text-blue-500 underline"
            {
                "Back to the dashboard"
            }
        }
    };

    (StatusCode::NOT_FOUND, base("Not Found", &content)).into_response()
}
