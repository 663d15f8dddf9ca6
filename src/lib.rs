//! Neno Finance is a web app for tracking personal income and expenses.
//!
//! This library provides a server-rendered dashboard, a JSON API for
//! transactions and categories backed by SQLite, and thin clients for the
//! Wise and Gmail APIs that will eventually feed imported transactions and
//! invoices into the store.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod account;
mod app_state;
mod category;
mod dashboard;
mod db;
mod endpoints;
mod error;
mod gmail;
mod html;
mod invoice;
mod logging;
mod navigation;
mod routing;
mod settings;
mod transaction;
mod wise;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use error::Error;
pub use gmail::{EmailInvoice, GmailClient};
pub use logging::logging_middleware;
pub use routing::build_router;
pub use wise::{Money, TransferKind, WiseClient, WiseTransaction};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
