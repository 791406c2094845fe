use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::TransactionRecord;

/// The number of records in each category that appears in a set of records.
///
/// Categories with no records are absent. Serializes as a JSON object keyed
/// by category label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct CategoryCounts(pub BTreeMap<String, u64>);

impl CategoryCounts {
    /// The count for `category`, zero if it was not observed.
    pub fn get(&self, category: &str) -> u64 {
        self.0.get(category).copied().unwrap_or(0)
    }
}

/// Count the records in each observed category.
pub fn count_categories(records: &[TransactionRecord]) -> CategoryCounts {
    let mut counts = BTreeMap::new();

    for record in records {
        *counts.entry(record.category.clone()).or_insert(0) += 1;
    }

    CategoryCounts(counts)
}
