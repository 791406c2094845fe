//! HTTP handlers for the aggregate views.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State},
};

use crate::{
    AppState, Error,
    params::{ApiQuery, MonthQuery},
    record::TransactionStore,
};

use super::{
    CategoryCounts, PriceHistogram, SalesStatistics, aggregate_month, build_price_histogram,
    compute_statistics, count_categories,
};

/// The state needed for the aggregate views.
#[derive(Clone)]
pub struct AggregateState {
    /// The store to read transactions from.
    pub store: Arc<dyn TransactionStore>,
}

impl FromRef<AppState> for AggregateState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// Get the sales totals for a month.
pub async fn get_statistics_endpoint(
    State(state): State<AggregateState>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<Json<SalesStatistics>, Error> {
    aggregate_month(query.month_filter(), state.store, compute_statistics)
        .await
        .map(Json)
}

/// Get the price histogram for a month.
pub async fn get_bar_chart_endpoint(
    State(state): State<AggregateState>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<Json<PriceHistogram>, Error> {
    aggregate_month(query.month_filter(), state.store, build_price_histogram)
        .await
        .map(Json)
}

/// Get the number of records in each category for a month.
pub async fn get_pie_chart_endpoint(
    State(state): State<AggregateState>,
    ApiQuery(query): ApiQuery<MonthQuery>,
) -> Result<Json<CategoryCounts>, Error> {
    aggregate_month(query.month_filter(), state.store, count_categories)
        .await
        .map(Json)
}
