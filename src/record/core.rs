//! Defines the transaction record ingested from the seed feed.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A single product sale (or unsold listing) from the seed feed.
///
/// Records are never edited after ingest; the whole store is replaced on each
/// seed. Every field falls back to a zero value when the upstream object
/// omits it, so aggregation treats missing data as zero rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// The identifier supplied by the seed feed. Not guaranteed to be unique.
    #[serde(default)]
    pub id: i64,
    /// The product name.
    #[serde(default)]
    pub title: String,
    /// A longer product description.
    #[serde(default)]
    pub description: String,
    /// The sale price. Expected to be non-negative.
    #[serde(default)]
    pub price: f64,
    /// When the product was sold. Only the month of this timestamp is queried.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date_of_sale: Option<OffsetDateTime>,
    /// The product category, an open set of labels.
    #[serde(default)]
    pub category: String,
    /// Whether the product was sold.
    #[serde(default)]
    pub sold: bool,
}

impl TransactionRecord {
    /// The price rendered as text, as matched by free-text search.
    ///
    /// Whole numbers have no fractional part, e.g. `100` rather than `100.0`.
    pub fn price_text(&self) -> String {
        self.price.to_string()
    }
}
