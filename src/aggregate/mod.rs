//! Month-scoped aggregate views: sales statistics, a price histogram and
//! per-category counts.
//!
//! Aggregates are computed over every record in the month; search text is
//! never applied.

mod categories;
mod handlers;
mod histogram;
mod statistics;

pub use categories::{CategoryCounts, count_categories};
pub use handlers::{get_bar_chart_endpoint, get_pie_chart_endpoint, get_statistics_endpoint};
pub use histogram::{PriceHistogram, build_price_histogram};
pub use statistics::{SalesStatistics, compute_statistics};

use std::sync::Arc;

use crate::{
    Error,
    record::{MonthFilter, RecordFilter, TransactionRecord, TransactionStore},
};

/// Read every record sold in `month` on the blocking thread pool and reduce
/// them to one aggregate view.
///
/// # Errors
/// Returns an error if the store cannot be read or the blocking task fails.
pub(crate) async fn aggregate_month<T, F>(
    month: MonthFilter,
    store: Arc<dyn TransactionStore>,
    reduce: F,
) -> Result<T, Error>
where
    T: Send + 'static,
    F: FnOnce(&[TransactionRecord]) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        store
            .find(&RecordFilter::month_only(month))
            .map(|records| reduce(&records))
    })
    .await?
    .inspect_err(|error| tracing::error!("could not read records for {month:?}: {error}"))
}

/// Reduce an already-read set of records on the blocking thread pool.
///
/// # Errors
/// Returns an error if the blocking task fails.
pub(crate) async fn reduce_records<T, F>(
    records: Arc<Vec<TransactionRecord>>,
    reduce: F,
) -> Result<T, Error>
where
    T: Send + 'static,
    F: FnOnce(&[TransactionRecord]) -> T + Send + 'static,
{
    Ok(tokio::task::spawn_blocking(move || reduce(&records)).await?)
}
