//! Predicates for selecting transaction records by month and by free text.

use time::Month;

use super::TransactionRecord;

/// Selects records by the calendar month of their sale date, for any year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    /// No month restriction.
    #[default]
    Any,
    /// Only records sold in this month, in any year.
    Month(Month),
    /// The selector did not name a month, so no record matches.
    Nothing,
}

impl MonthFilter {
    /// Parse a month selector from a query parameter.
    ///
    /// Accepts `1`-`12` (leading zeros allowed), English month names, and
    /// three-letter abbreviations, ignoring case. A missing or blank value
    /// means [MonthFilter::Any]. Anything else, such as `13`, parses to
    /// [MonthFilter::Nothing] rather than an error.
    pub fn parse(selector: Option<&str>) -> Self {
        let selector = match selector.map(str::trim) {
            None | Some("") => return MonthFilter::Any,
            Some(selector) => selector,
        };

        if let Ok(number) = selector.parse::<u8>() {
            return Month::try_from(number)
                .map(MonthFilter::Month)
                .unwrap_or(MonthFilter::Nothing);
        }

        let selector = selector.to_lowercase();
        MONTH_NAMES
            .iter()
            .find(|(name, _)| *name == selector || name[..3] == selector)
            .map(|(_, month)| MonthFilter::Month(*month))
            .unwrap_or(MonthFilter::Nothing)
    }

    /// Whether `record` was sold in the selected month.
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        match self {
            MonthFilter::Any => true,
            MonthFilter::Month(month) => record
                .date_of_sale
                .is_some_and(|date_of_sale| date_of_sale.month() == *month),
            MonthFilter::Nothing => false,
        }
    }
}

const MONTH_NAMES: [(&str, Month); 12] = [
    ("january", Month::January),
    ("february", Month::February),
    ("march", Month::March),
    ("april", Month::April),
    ("may", Month::May),
    ("june", Month::June),
    ("july", Month::July),
    ("august", Month::August),
    ("september", Month::September),
    ("october", Month::October),
    ("november", Month::November),
    ("december", Month::December),
];

/// A case-insensitive, literal substring search over a record's title,
/// description and price.
///
/// The search text is never interpreted as a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchFilter {
    needle: String,
}

impl SearchFilter {
    /// Create a search for `text`. Empty text matches every record.
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }

    /// Whether the search text appears in the title, description or price of `record`.
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        if self.needle.is_empty() {
            return true;
        }

        record.title.to_lowercase().contains(&self.needle)
            || record.description.to_lowercase().contains(&self.needle)
            || record.price_text().contains(&self.needle)
    }
}

/// The month and search clauses that select the records for one request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordFilter {
    /// Restricts records to a calendar month.
    pub month: MonthFilter,
    /// Restricts records to those containing some text.
    pub search: SearchFilter,
}

impl RecordFilter {
    /// A filter with both a month and a search clause.
    pub fn new(month: MonthFilter, search: SearchFilter) -> Self {
        Self { month, search }
    }

    /// A filter that only restricts the month.
    pub fn month_only(month: MonthFilter) -> Self {
        Self {
            month,
            search: SearchFilter::default(),
        }
    }

    /// Whether `record` satisfies every clause.
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        self.month.matches(record) && self.search.matches(record)
    }
}

#[cfg(test)]
mod month_filter_tests {
    use time::{Month, macros::datetime};

    use crate::test_utils::record;

    use super::MonthFilter;

    #[test]
    fn parses_numbers_and_names() {
        assert_eq!(MonthFilter::parse(Some("5")), MonthFilter::Month(Month::May));
        assert_eq!(MonthFilter::parse(Some("05")), MonthFilter::Month(Month::May));
        assert_eq!(
            MonthFilter::parse(Some("March")),
            MonthFilter::Month(Month::March)
        );
        assert_eq!(
            MonthFilter::parse(Some("dec")),
            MonthFilter::Month(Month::December)
        );
    }

    #[test]
    fn missing_or_blank_month_matches_any() {
        assert_eq!(MonthFilter::parse(None), MonthFilter::Any);
        assert_eq!(MonthFilter::parse(Some("  ")), MonthFilter::Any);
    }

    #[test]
    fn out_of_range_month_matches_nothing() {
        for selector in ["0", "13", "-1", "foo", "ma"] {
            let filter = MonthFilter::parse(Some(selector));

            assert_eq!(filter, MonthFilter::Nothing, "selector {selector:?}");
            assert!(!filter.matches(&record(1, 10.0, true, "A", "2022-01-01T00:00:00Z")));
        }
    }

    #[test]
    fn matches_month_in_any_year() {
        let filter = MonthFilter::Month(Month::May);

        for year in [1999, 2021, 2024] {
            let mut may = record(1, 10.0, true, "A", "2022-05-31T23:59:59Z");
            may.date_of_sale = may.date_of_sale.map(|date| date.replace_year(year).unwrap());
            assert!(filter.matches(&may), "year {year}");
        }

        let june = record(2, 10.0, true, "A", "2022-06-01T00:00:00Z");
        assert!(!filter.matches(&june));
    }

    #[test]
    fn matches_every_month_exactly() {
        for number in 1..=12u8 {
            let month = Month::try_from(number).unwrap();
            let filter = MonthFilter::Month(month);

            for other in 1..=12u8 {
                let mut candidate = record(1, 10.0, true, "A", "2021-01-15T12:00:00Z");
                candidate.date_of_sale = Some(
                    datetime!(2021-01-15 12:00 UTC)
                        .replace_month(Month::try_from(other).unwrap())
                        .unwrap(),
                );

                assert_eq!(filter.matches(&candidate), number == other);
            }
        }
    }

    #[test]
    fn uses_month_of_the_recorded_offset() {
        let filter = MonthFilter::Month(Month::November);
        let mut candidate = record(1, 10.0, true, "A", "2021-11-30T23:30:00-05:00");
        assert!(filter.matches(&candidate));

        candidate.date_of_sale = Some(datetime!(2021-12-01 00:30 +05:30));
        assert!(!filter.matches(&candidate));
    }

    #[test]
    fn record_without_date_only_matches_any() {
        let mut candidate = record(1, 10.0, true, "A", "2021-05-01T00:00:00Z");
        candidate.date_of_sale = None;

        assert!(MonthFilter::Any.matches(&candidate));
        assert!(!MonthFilter::Month(Month::May).matches(&candidate));
    }
}
