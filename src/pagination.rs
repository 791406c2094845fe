//! This modules defines the common functionality for paging data.

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to display per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A validated request for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    per_page: u64,
}

impl PageRequest {
    /// Create a page request.
    ///
    /// # Errors
    /// Returns [Error::InvalidArgument] if `page` or `per_page` is zero.
    pub fn new(page: u64, per_page: u64) -> Result<Self, Error> {
        if page == 0 {
            return Err(Error::InvalidArgument("page must be at least 1".to_owned()));
        }

        if per_page == 0 {
            return Err(Error::InvalidArgument(
                "perPage must be at least 1".to_owned(),
            ));
        }

        Ok(Self { page, per_page })
    }

    /// The page number, starting from 1.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// The maximum number of items on a page.
    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// The number of items before the start of this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// The number of pages needed to show `total` items.
    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(self.per_page)
    }
}
