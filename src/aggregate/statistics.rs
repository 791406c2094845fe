use serde::Serialize;

use crate::record::TransactionRecord;

/// Sales totals for a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStatistics {
    /// The summed price of sold records.
    pub total_sale_amount: f64,
    /// The number of sold records.
    pub total_sold_items: u64,
    /// The number of unsold records.
    pub total_not_sold_items: u64,
}

/// Compute sales totals in a single pass over `records`.
///
/// Unsold records are counted but never add to the sale amount.
pub fn compute_statistics(records: &[TransactionRecord]) -> SalesStatistics {
    records
        .iter()
        .fold(SalesStatistics::default(), |mut statistics, record| {
            if record.sold {
                statistics.total_sale_amount += record.price;
                statistics.total_sold_items += 1;
            } else {
                statistics.total_not_sold_items += 1;
            }

            statistics
        })
}
