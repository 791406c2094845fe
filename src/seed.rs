//! Seeds the record store from the remote JSON feed.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State},
};
use reqwest::Client;
use serde::Serialize;

use crate::{
    AppState, Error,
    record::{TransactionRecord, TransactionStore},
};

/// The public product transaction feed used when no other seed URL is configured.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// Download the seed feed from `url` and parse it as a list of transactions.
///
/// # Errors
/// Returns [Error::UpstreamFetch] if the request fails, the server responds
/// with an error status, or the body is not a JSON array of transactions.
pub async fn fetch_seed_records(
    client: &Client,
    url: &str,
) -> Result<Vec<TransactionRecord>, Error> {
    tracing::info!("Fetching seed data from {url}");

    let response = client.get(url).send().await?.error_for_status()?;
    let records = response.json::<Vec<TransactionRecord>>().await?;

    tracing::debug!("Fetched {} seed records", records.len());

    Ok(records)
}

/// Replace the contents of `store` with the records from the seed feed.
///
/// The feed is downloaded and parsed before the store is touched, so a
/// failed fetch leaves the previous records in place.
///
/// # Errors
/// Returns [Error::UpstreamFetch] if the feed cannot be fetched, or a store
/// error if the records cannot be written.
pub async fn initialize_store(
    client: &Client,
    url: &str,
    store: Arc<dyn TransactionStore>,
) -> Result<usize, Error> {
    let records = fetch_seed_records(client, url).await?;
    let record_count = records.len();

    tokio::task::spawn_blocking(move || store.replace_all(records)).await??;

    tracing::info!("Initialized store with {record_count} records");

    Ok(record_count)
}

/// The state needed for seeding the store.
#[derive(Clone)]
pub struct SeedState {
    /// The store to replace.
    pub store: Arc<dyn TransactionStore>,
    /// The client used to download the feed.
    pub http_client: Client,
    /// Where to download the feed from.
    pub seed_url: String,
}

impl FromRef<AppState> for SeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            http_client: state.http_client.clone(),
            seed_url: state.seed_url.clone(),
        }
    }
}

/// The response body for a successful seed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResponse {
    message: &'static str,
    record_count: usize,
}

/// Replace every stored record with a fresh copy of the seed feed.
pub async fn initialize_endpoint(
    State(state): State<SeedState>,
) -> Result<Json<InitializeResponse>, Error> {
    let record_count = initialize_store(&state.http_client, &state.seed_url, state.store).await?;

    Ok(Json(InitializeResponse {
        message: "Database initialized successfully",
        record_count,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Json, Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use reqwest::Client;
    use serde_json::json;
    use tokio::net::TcpListener;

    use crate::{
        Error, build_router, endpoints,
        record::{MemoryStore, RecordFilter, TransactionStore},
        test_utils::{app_state_with, sample_records},
    };

    use super::{fetch_seed_records, initialize_store};

    const SEED_PATH: &str = "/product_transaction.json";

    /// Serve `router` on a random local port and return its base URL.
    async fn spawn_seed_server(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind seed server");
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Seed server failed");
        });

        format!("http://{address}")
    }

    async fn serve_json(body: serde_json::Value) -> String {
        let router = Router::new().route(SEED_PATH, get(move || async move { Json(body) }));
        let base_url = spawn_seed_server(router).await;

        format!("{base_url}{SEED_PATH}")
    }

    fn seed_json() -> serde_json::Value {
        json!([
            {
                "id": 1,
                "title": "Backpack",
                "price": 50,
                "description": "Perfect pack",
                "category": "A",
                "image": "https://example.com/1.jpg",
                "sold": true,
                "dateOfSale": "2024-05-01T10:00:00+05:30"
            },
            {
                "id": 2,
                "title": "Slim Fit T-Shirt",
                "price": 150,
                "description": "Casual cotton",
                "category": "B",
                "image": "https://example.com/2.jpg",
                "sold": false,
                "dateOfSale": "2023-05-10T08:30:00+05:30"
            }
        ])
    }

    #[tokio::test]
    async fn fetches_and_parses_records() {
        let url = serve_json(seed_json()).await;

        let records = fetch_seed_records(&Client::new(), &url).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Backpack");
        assert_eq!(records[1].price, 150.0);
    }

    #[tokio::test]
    async fn malformed_feed_is_upstream_error() {
        let url = serve_json(json!({ "not": "an array" })).await;

        let result = fetch_seed_records(&Client::new(), &url).await;

        assert!(matches!(result, Err(Error::UpstreamFetch(_))));
    }

    #[tokio::test]
    async fn error_status_is_upstream_error() {
        let router = Router::new().route(
            SEED_PATH,
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let url = format!("{}{SEED_PATH}", spawn_seed_server(router).await);

        let result = fetch_seed_records(&Client::new(), &url).await;

        assert!(matches!(result, Err(Error::UpstreamFetch(_))));
    }

    #[tokio::test]
    async fn initialize_replaces_store_contents() {
        let url = serve_json(seed_json()).await;
        let store = Arc::new(MemoryStore::new());
        store.replace_all(sample_records()).unwrap();

        let count = initialize_store(&Client::new(), &url, store.clone())
            .await
            .unwrap();

        let records = store.find(&RecordFilter::default()).unwrap();
        assert_eq!(count, 2);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_records() {
        let url = serve_json(json!("oops")).await;
        let store = Arc::new(MemoryStore::new());
        store.replace_all(sample_records()).unwrap();

        let result = initialize_store(&Client::new(), &url, store.clone()).await;

        assert!(result.is_err());
        assert_eq!(
            store.find(&RecordFilter::default()).unwrap(),
            sample_records()
        );
    }

    #[tokio::test]
    async fn initialize_endpoint_seeds_store() {
        let url = serve_json(seed_json()).await;
        let store = Arc::new(MemoryStore::new());
        let server = TestServer::new(build_router(app_state_with(store.clone(), &url)));

        let response = server.get(endpoints::INITIALIZE).await;

        response.assert_status_ok();
        assert_eq!(response.json::<serde_json::Value>()["recordCount"], 2);

        let statistics = server
            .get(endpoints::STATISTICS)
            .add_query_param("month", "5")
            .await
            .json::<serde_json::Value>();
        assert_eq!(statistics["totalSaleAmount"], 50.0);
    }

    #[tokio::test]
    async fn initialize_endpoint_reports_unreachable_feed() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);
        let store = Arc::new(MemoryStore::new());
        store.replace_all(sample_records()).unwrap();
        let url = format!("http://{address}{SEED_PATH}");
        let server = TestServer::new(build_router(app_state_with(store.clone(), &url)));

        let response = server.get(endpoints::INITIALIZE).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<serde_json::Value>(),
            json!({ "error": "Failed to fetch and initialize data" })
        );
        assert_eq!(store.find(&RecordFilter::default()).unwrap().len(), 5);
    }
}
