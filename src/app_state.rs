//! Implements a struct that holds the state of the REST server.

use std::{sync::Arc, time::Duration};

use reqwest::Client;

use crate::{Error, pagination::PaginationConfig, record::TransactionStore};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The store holding the seeded transaction records.
    pub store: Arc<dyn TransactionStore>,

    /// The config that controls how to page the transaction listing.
    pub pagination_config: PaginationConfig,

    /// Where `/initialize` downloads the seed feed from.
    pub seed_url: String,

    /// The client used to download the seed feed.
    pub http_client: Client,
}

impl AppState {
    /// Create a new [AppState] around `store`.
    ///
    /// `seed_timeout` bounds the whole seed download, including reading the body.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        store: Arc<dyn TransactionStore>,
        seed_url: &str,
        seed_timeout: Duration,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        let http_client = Client::builder()
            .timeout(seed_timeout)
            .build()
            .map_err(|error| Error::UpstreamFetch(format!("could not create HTTP client: {error}")))?;

        Ok(Self {
            store,
            pagination_config,
            seed_url: seed_url.to_owned(),
            http_client,
        })
    }
}
