//! Zillow listing lookup through `RapidAPI`.
//!
//! A single `GET` with an `address` query parameter returns the matching
//! listing as a flat JSON object.

use crate::service::ListingService;
use crate::{ListingError, ListingProvider, ListingRecord};

/// Zillow search-by-address client.
pub struct ZillowClient {
    client: reqwest::Client,
    service: ListingService,
    api_key: Option<String>,
}

impl ZillowClient {
    /// Creates a client for `service` with a request timeout taken from its
    /// configuration.
    ///
    /// A missing `api_key` is not an error here; lookups fail with
    /// [`ListingError::MissingApiKey`] instead, so the rest of the API can
    /// still be served.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Http`] if the HTTP client cannot be built.
    pub fn new(service: ListingService, api_key: Option<String>) -> Result<Self, ListingError> {
        let client = reqwest::Client::builder()
            .timeout(service.timeout())
            .build()?;

        Ok(Self {
            client,
            service,
            api_key,
        })
    }

    /// Creates a client from the embedded Zillow configuration, reading the
    /// API key from its configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Http`] if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, ListingError> {
        let service = crate::service::zillow();
        let api_key = service.api_key_from_env();
        if api_key.is_none() {
            log::warn!(
                "{} is not set; address lookups via {} will fail",
                service.api_key_env,
                service.name
            );
        }
        Self::new(service, api_key)
    }
}

#[async_trait::async_trait]
impl ListingProvider for ZillowClient {
    async fn fetch_by_address(&self, address: &str) -> Result<ListingRecord, ListingError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ListingError::MissingApiKey(self.service.api_key_env.clone()))?;

        log::debug!("{} lookup for address: {address}", self.service.name);

        let resp = self
            .client
            .get(&self.service.base_url)
            .header("x-rapidapi-key", api_key)
            .header("x-rapidapi-host", &self.service.rapidapi_host)
            .query(&[("address", address)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            log::error!(
                "{} lookup failed with HTTP {status} for address: {address}",
                self.service.name
            );
            return Err(ListingError::Status(status.as_u16()));
        }

        let body: serde_json::Value = resp.json().await?;
        ListingRecord::from_value(body)
    }
}
