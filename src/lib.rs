//! Sales dashboard is a small REST service that seeds a transaction store from a
//! remote JSON feed and serves query and aggregation views over it.
//!
//! Every read view is scoped to a calendar month (ignoring the year):
//! - a paginated, text-searchable listing of transactions,
//! - sales statistics,
//! - a fixed-bucket price histogram,
//! - per-category counts,
//! - and a combined view of all four.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod aggregate;
mod app_state;
mod combined;
mod endpoints;
mod listing;
mod logging;
mod pagination;
mod params;
mod record;
mod routing;
mod seed;

#[cfg(test)]
mod test_utils;

pub use aggregate::{CategoryCounts, PriceHistogram, SalesStatistics};
pub use app_state::AppState;
pub use combined::CombinedView;
pub use listing::TransactionPage;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::{PageRequest, PaginationConfig};
pub use record::{
    MemoryStore, MonthFilter, RecordFilter, SearchFilter, SqliteStore, TransactionRecord,
    TransactionStore,
};
pub use routing::build_router;
pub use seed::{DEFAULT_SEED_URL, fetch_seed_records, initialize_store};

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

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The seed source could not be reached, returned an error status, or
    /// returned something other than a JSON array of transactions.
    ///
    /// The store is left untouched when this error occurs.
    #[error("could not fetch seed data: {0}")]
    UpstreamFetch(String),

    /// A query parameter could not be used, e.g. a non-numeric page number
    /// or a page size of zero.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The response body could not be read back after the handler ran.
    #[error("could not read the response body: {0}")]
    ResponseBody(String),

    /// A blocking store task panicked or was cancelled before it finished.
    #[error("a background task failed: {0}")]
    TaskFailed(String),

    /// The requested route does not exist.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::UpstreamFetch(value.to_string())
    }
}

impl From<QueryRejection> for Error {
    fn from(value: QueryRejection) -> Self {
        Error::InvalidArgument(value.body_text())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Error::TaskFailed(value.to_string())
    }
}

/// The JSON body sent to the client for every failed request.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::InvalidArgument(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Error::UpstreamFetch(ref reason) => {
                tracing::error!("Failed to initialize the store: {reason}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch and initialize data".to_owned(),
                )
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
