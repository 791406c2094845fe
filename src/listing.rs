//! The paginated, searchable transaction listing.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::Serialize;

use crate::{
    AppState, Error,
    pagination::{PageRequest, PaginationConfig},
    params::{ApiQuery, ListingQuery},
    record::{RecordFilter, TransactionRecord, TransactionStore},
};

/// One page of transactions matching a month and search filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    /// The records on the requested page, in store order.
    pub transactions: Vec<TransactionRecord>,
    /// The number of pages needed to show every matching record.
    pub total_pages: u64,
}

/// Get one page of the records matching `filter`.
///
/// The store is read once, so the page and the page count always describe
/// the same set of records.
///
/// # Errors
/// Returns an error if the store cannot be read.
pub fn list_transactions(
    filter: &RecordFilter,
    page_request: PageRequest,
    store: &dyn TransactionStore,
) -> Result<TransactionPage, Error> {
    let matches = store.find(filter)?;

    Ok(paginate(matches, page_request))
}

/// Cut the requested page out of `matches`.
///
/// A page past the end of the results is empty, but still reports the total
/// page count.
pub fn paginate(matches: Vec<TransactionRecord>, page_request: PageRequest) -> TransactionPage {
    let total_pages = page_request.page_count(matches.len() as u64);
    let transactions = matches
        .into_iter()
        .skip(usize::try_from(page_request.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(page_request.per_page()).unwrap_or(usize::MAX))
        .collect();

    TransactionPage {
        transactions,
        total_pages,
    }
}

/// The state needed for the transaction listing.
#[derive(Clone)]
pub struct ListingState {
    /// The store to read transactions from.
    pub store: Arc<dyn TransactionStore>,
    /// Defaults for missing pagination parameters.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ListingState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// Get a page of transactions for a month, optionally filtered by search text.
pub async fn get_transactions_endpoint(
    State(state): State<ListingState>,
    ApiQuery(query): ApiQuery<ListingQuery>,
) -> Result<Json<TransactionPage>, Error> {
    let page_request = query.page_request(&state.pagination_config)?;
    let filter = RecordFilter::new(query.month_filter(), query.search_filter());

    let page = tokio::task::spawn_blocking(move || {
        list_transactions(&filter, page_request, state.store.as_ref())
    })
    .await?
    .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    Ok(Json(page))
}
