use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::record::TransactionRecord;

/// The histogram buckets as (label, inclusive upper bound on price).
///
/// The last bucket has no upper bound, so every price falls in exactly one bucket.
const PRICE_BUCKETS: [(&str, Option<f64>); 10] = [
    ("0-100", Some(100.0)),
    ("101-200", Some(200.0)),
    ("201-300", Some(300.0)),
    ("301-400", Some(400.0)),
    ("401-500", Some(500.0)),
    ("501-600", Some(600.0)),
    ("601-700", Some(700.0)),
    ("701-800", Some(800.0)),
    ("801-900", Some(900.0)),
    ("901-above", None),
];

/// The number of records in each of ten fixed price ranges.
///
/// Serializes as a JSON object with every bucket label present, in bucket
/// order, even when its count is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceHistogram {
    counts: [u64; PRICE_BUCKETS.len()],
}

impl PriceHistogram {
    /// The bucket labels in order.
    pub fn labels() -> impl Iterator<Item = &'static str> {
        PRICE_BUCKETS.iter().map(|(label, _)| *label)
    }

    /// The count for the bucket named `label`, or `None` if there is no such bucket.
    pub fn get(&self, label: &str) -> Option<u64> {
        PRICE_BUCKETS
            .iter()
            .position(|(bucket_label, _)| *bucket_label == label)
            .map(|index| self.counts[index])
    }

    /// The bucket labels paired with their counts, in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        Self::labels().zip(self.counts.iter().copied())
    }

    /// The sum of all bucket counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    fn add(&mut self, price: f64) {
        let index = bucket_index(price);
        self.counts[index] += 1;
    }
}

impl Serialize for PriceHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (label, count) in self.iter() {
            map.serialize_entry(label, &count)?;
        }
        map.end()
    }
}

/// The index of the first bucket whose upper bound is at least `price`.
fn bucket_index(price: f64) -> usize {
    PRICE_BUCKETS
        .iter()
        .position(|(_, upper_bound)| upper_bound.is_none_or(|upper_bound| price <= upper_bound))
        .unwrap_or(PRICE_BUCKETS.len() - 1)
}

/// Count the records in each price bucket.
pub fn build_price_histogram(records: &[TransactionRecord]) -> PriceHistogram {
    let mut histogram = PriceHistogram::default();

    for record in records {
        histogram.add(record.price);
    }

    histogram
}
