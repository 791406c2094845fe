//! The API endpoints URIs.
//!
//! Every route is also served under [API_PREFIX].

/// The prefix the dashboard client uses for every route.
pub const API_PREFIX: &str = "/api";
/// The route that replaces the store contents with the seed feed.
pub const INITIALIZE: &str = "/initialize";
/// The route for the paginated transaction listing.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for a month's sales totals.
pub const STATISTICS: &str = "/statistics";
/// The route for a month's price histogram.
pub const BAR_CHART: &str = "/barchart";
/// The route for a month's category counts.
pub const PIE_CHART: &str = "/piechart";
/// The route for the listing and all aggregate views in one response.
pub const COMBINED: &str = "/combined";
