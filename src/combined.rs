//! The combined dashboard view: the transaction listing plus all three aggregate views.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::Serialize;

use crate::{
    AppState, Error,
    aggregate::{
        CategoryCounts, PriceHistogram, SalesStatistics, build_price_histogram,
        compute_statistics, count_categories, reduce_records,
    },
    listing::{TransactionPage, paginate},
    pagination::{PageRequest, PaginationConfig},
    params::{ApiQuery, ListingQuery},
    record::{RecordFilter, TransactionStore},
};

/// Everything the dashboard shows for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedView {
    /// The searched, paginated listing.
    pub transactions: TransactionPage,
    /// Sales totals for the whole month.
    pub statistics: SalesStatistics,
    /// The price histogram for the whole month.
    pub bar_chart: PriceHistogram,
    /// Category counts for the whole month.
    pub pie_chart: CategoryCounts,
}

/// Build the combined view for one month.
///
/// The month's records are read from the store once. The listing applies
/// `filter` in full to that set, while the aggregates only use its month.
/// The four views are then computed concurrently on the blocking thread pool;
/// if any of them fails the whole view fails.
///
/// # Errors
/// Returns an error if the store cannot be read or any view fails.
pub async fn build_combined_view(
    filter: RecordFilter,
    page_request: PageRequest,
    store: Arc<dyn TransactionStore>,
) -> Result<CombinedView, Error> {
    let month = filter.month;
    let month_records = tokio::task::spawn_blocking(move || {
        store.find(&RecordFilter::month_only(month))
    })
    .await?
    .inspect_err(|error| tracing::error!("could not read records for {month:?}: {error}"))?;
    let month_records = Arc::new(month_records);

    let listing = reduce_records(month_records.clone(), move |records| {
        let matches = records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();

        paginate(matches, page_request)
    });
    let statistics = reduce_records(month_records.clone(), compute_statistics);
    let bar_chart = reduce_records(month_records.clone(), build_price_histogram);
    let pie_chart = reduce_records(month_records, count_categories);

    let (transactions, statistics, bar_chart, pie_chart) =
        tokio::try_join!(listing, statistics, bar_chart, pie_chart)?;

    Ok(CombinedView {
        transactions,
        statistics,
        bar_chart,
        pie_chart,
    })
}

/// The state needed for the combined view.
#[derive(Clone)]
pub struct CombinedState {
    /// The store to read transactions from.
    pub store: Arc<dyn TransactionStore>,
    /// Defaults for missing pagination parameters.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for CombinedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// Get the listing, statistics, histogram and category counts for a month in one response.
pub async fn get_combined_endpoint(
    State(state): State<CombinedState>,
    ApiQuery(query): ApiQuery<ListingQuery>,
) -> Result<Json<CombinedView>, Error> {
    let page_request = query.page_request(&state.pagination_config)?;
    let filter = RecordFilter::new(query.month_filter(), query.search_filter());

    build_combined_view(filter, page_request, state.store)
        .await
        .inspect_err(|error| tracing::error!("could not build combined view: {error}"))
        .map(Json)
}
