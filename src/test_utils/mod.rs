#![allow(missing_docs)]

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{body::Body, http::Response};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    AppState, Error,
    pagination::PaginationConfig,
    record::{MemoryStore, RecordFilter, TransactionRecord, TransactionStore},
};

/// An [AppState] around `store` that seeds from `seed_url`.
pub(crate) fn app_state_with(store: Arc<dyn TransactionStore>, seed_url: &str) -> AppState {
    AppState::new(
        store,
        seed_url,
        Duration::from_secs(5),
        PaginationConfig::default(),
    )
    .expect("Could not create app state")
}

/// An [AppState] with an empty in-memory store.
pub(crate) fn empty_app_state() -> AppState {
    app_state_with(Arc::new(MemoryStore::new()), "http://127.0.0.1:9/unused.json")
}

/// An [AppState] holding [sample_records].
pub(crate) fn sample_app_state() -> AppState {
    let store = MemoryStore::new();
    store
        .replace_all(sample_records())
        .expect("Could not seed store");

    app_state_with(Arc::new(store), "http://127.0.0.1:9/unused.json")
}

/// Create a record with a placeholder title and description.
///
/// `date_of_sale` must be an RFC 3339 timestamp.
#[track_caller]
pub(crate) fn record(
    id: i64,
    price: f64,
    sold: bool,
    category: &str,
    date_of_sale: &str,
) -> TransactionRecord {
    TransactionRecord {
        id,
        title: format!("Product #{id}"),
        description: "Placeholder".to_owned(),
        price,
        date_of_sale: Some(
            OffsetDateTime::parse(date_of_sale, &Rfc3339).expect("Invalid RFC 3339 timestamp"),
        ),
        category: category.to_owned(),
        sold,
    }
}

/// A small data set spanning several months and years.
///
/// Two records fall in May: `Backpack` (50, sold, "A", 2024) and
/// `Slim Fit T-Shirt` (150, unsold, "B", 2023).
pub(crate) fn sample_records() -> Vec<TransactionRecord> {
    let mut backpack = record(1, 50.0, true, "A", "2024-05-01T10:00:00Z");
    backpack.title = "Backpack".to_owned();
    backpack.description = "Perfect pack for everyday use".to_owned();

    let mut shirt = record(2, 150.0, false, "B", "2023-05-10T08:30:00+05:30");
    shirt.title = "Slim Fit T-Shirt".to_owned();
    shirt.description = "Casual cotton shirt".to_owned();

    let mut bracelet = record(3, 695.0, true, "jewelery", "2022-06-15T12:00:00Z");
    bracelet.title = "Gold Bracelet".to_owned();
    bracelet.description = "Chain bracelet".to_owned();

    let mut drive = record(4, 999.99, true, "electronics", "2021-07-20T18:45:00Z");
    drive.title = "External Hard Drive".to_owned();
    drive.description = "USB 3.0 storage".to_owned();

    let mut jacket = record(5, 100.5, false, "B", "2022-01-03T09:15:00-03:00");
    jacket.title = "Rain Jacket".to_owned();
    jacket.description = "Lightweight windbreaker".to_owned();

    vec![backpack, shirt, bracelet, drive, jacket]
}

/// A store that serves `before` on its first read and `after` on every
/// later read, as if an ingest landed right after the first read.
pub(crate) struct ShiftingStore {
    reads: AtomicUsize,
    before: Vec<TransactionRecord>,
    after: Vec<TransactionRecord>,
}

impl ShiftingStore {
    pub(crate) fn new(before: Vec<TransactionRecord>, after: Vec<TransactionRecord>) -> Self {
        Self {
            reads: AtomicUsize::new(0),
            before,
            after,
        }
    }
}

impl TransactionStore for ShiftingStore {
    fn replace_all(&self, _records: Vec<TransactionRecord>) -> Result<(), Error> {
        Err(Error::DatabaseLockError)
    }

    fn find(&self, filter: &RecordFilter) -> Result<Vec<TransactionRecord>, Error> {
        let records = match self.reads.fetch_add(1, Ordering::SeqCst) {
            0 => &self.before,
            _ => &self.after,
        };

        Ok(records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }
}

/// Read a response body as JSON.
pub(crate) async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");

    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}
