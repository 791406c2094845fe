//! Application router configuration.

use axum::{Router, middleware, routing::get};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, Error,
    aggregate::{get_bar_chart_endpoint, get_pie_chart_endpoint, get_statistics_endpoint},
    combined::get_combined_endpoint,
    endpoints,
    listing::get_transactions_endpoint,
    logging::logging_middleware,
    seed::initialize_endpoint,
};

/// Return a router with all the app's routes.
///
/// Routes are served both at the root and under [endpoints::API_PREFIX].
pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .route(endpoints::INITIALIZE, get(initialize_endpoint))
        .route(endpoints::TRANSACTIONS, get(get_transactions_endpoint))
        .route(endpoints::STATISTICS, get(get_statistics_endpoint))
        .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint))
        .route(endpoints::PIE_CHART, get(get_pie_chart_endpoint))
        .route(endpoints::COMBINED, get(get_combined_endpoint));

    Router::new()
        .merge(routes.clone())
        .nest(endpoints::API_PREFIX, routes)
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}
