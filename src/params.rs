//! Query parameters shared by the read endpoints.
//!
//! Values are deserialized as raw strings so that malformed numbers are
//! reported with the same JSON error body as every other failure. Query
//! strings that cannot be deserialized at all are rejected through
//! [ApiQuery] for the same reason.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    Error,
    pagination::{PageRequest, PaginationConfig},
    record::{MonthFilter, SearchFilter},
};

/// Extracts `T` from the query string like [Query], but rejects with [Error].
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;

        Ok(Self(value))
    }
}

/// Query parameters for the aggregate views.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// The month to aggregate, `1`-`12` or a month name.
    pub month: Option<String>,
}

impl MonthQuery {
    /// The month filter named by the query.
    pub fn month_filter(&self) -> MonthFilter {
        MonthFilter::parse(self.month.as_deref())
    }
}

/// Query parameters for the transaction listing and the combined view.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    /// The month to list, `1`-`12` or a month name.
    pub month: Option<String>,
    /// Text to search for in the title, description and price.
    pub search: Option<String>,
    /// The page number to display. Starts from 1.
    pub page: Option<String>,
    /// The maximum number of transactions to display per page.
    #[serde(alias = "per_page")]
    pub per_page: Option<String>,
}

impl ListingQuery {
    /// The month filter named by the query.
    pub fn month_filter(&self) -> MonthFilter {
        MonthFilter::parse(self.month.as_deref())
    }

    /// The search clause named by the query. Missing search text matches everything.
    pub fn search_filter(&self) -> SearchFilter {
        SearchFilter::new(self.search.as_deref().unwrap_or_default())
    }

    /// The requested page, with defaults from `config` for missing values.
    ///
    /// # Errors
    /// Returns [Error::InvalidArgument] if `page` or `perPage` is not a
    /// positive integer.
    pub fn page_request(&self, config: &PaginationConfig) -> Result<PageRequest, Error> {
        let page = parse_positive("page", self.page.as_deref(), config.default_page)?;
        let per_page = parse_positive("perPage", self.per_page.as_deref(), config.default_page_size)?;

        PageRequest::new(page, per_page)
    }
}

fn parse_positive(name: &str, value: Option<&str>, default: u64) -> Result<u64, Error> {
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(text) => text.parse::<u64>().map_err(|_| {
            Error::InvalidArgument(format!("{name} must be a positive integer, got \"{text}\""))
        }),
    }
}
