//! FinFocus is a personal expense tracker.
//!
//! Users record expenses against spending categories and the library keeps
//! each user's balance consistent with the recorded expenses. It also reports
//! time-bounded aggregates, such as the monthly spend per category and what
//! is left to save.
//!
//! The core operations are plain functions over a [rusqlite::Connection].
//! [build_router] wraps them in a JSON REST API.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod api_response;
mod app_state;
pub mod calendar;
pub mod category;
mod database_id;
mod db;
pub mod endpoints;
mod error;
pub mod expense;
pub mod extract;
mod logging;
mod money;
mod routing;
pub mod summary;
pub mod timezone;
pub mod user;

#[cfg(test)]
mod test_utils;

pub use api_response::ApiResponse;
pub use app_state::{AppState, DbState};
pub use database_id::{CategoryId, DatabaseId, ExpenseId};
pub use db::initialize as initialize_db;
pub use error::{Error, ErrorKind};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
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
