//! CountriesNow client.
//!
//! CountriesNow aggregates open country datasets behind a single envelope:
//!
//! ```json
//! { "error": false, "msg": "...", "data": [ ... ] }
//! ```
//!
//! # API Reference
//!
//! See: <https://documenter.getpostman.com/view/1134062/T1LJjU52>
//!
//! # Endpoints Used
//!
//! - `GET /countries/population` - yearly population counts for every country
//! - `GET /countries/flag/images` - flag image URLs for every country
//!
//! Both endpoints return the full dataset; entries are keyed by country name.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::{FlagProvider, PopulationProvider, ProviderError};
use crate::model::{FlagRecord, PopulationRecord};

/// Base URL for the CountriesNow API.
pub const COUNTRIES_NOW_API_BASE: &str = "https://countriesnow.space/api/v0.1";

const PROVIDER: &str = "countriesnow";

/// Client for the CountriesNow dataset endpoints.
#[derive(Clone)]
pub struct CountriesNowClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for CountriesNowClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CountriesNowClient {
    /// Create a new client against the public API.
    pub fn new() -> Self {
        Self::with_base_url(COUNTRIES_NOW_API_BASE)
    }

    /// Create a client with a custom base URL (for testing or mirrors).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_dataset<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ProviderError> {
        let url = format!("{}{}", self.base_url, path);

        let envelope = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(ProviderError::transport(PROVIDER))?
            .json::<Envelope>()
            .await
            .map_err(ProviderError::transport(PROVIDER))?;

        envelope.into_records(path)
    }
}

#[async_trait]
impl PopulationProvider for CountriesNowClient {
    async fn population_records(&self) -> Result<Vec<PopulationRecord>, ProviderError> {
        self.fetch_dataset("/countries/population").await
    }
}

#[async_trait]
impl FlagProvider for CountriesNowClient {
    async fn flag_records(&self) -> Result<Vec<FlagRecord>, ProviderError> {
        self.fetch_dataset("/countries/flag/images").await
    }
}

// ============================================================================
// Response envelope
// ============================================================================

/// Common wrapper around every CountriesNow response.
///
/// `data` stays untyped so that each entry is decoded on its own.
#[derive(Debug, Deserialize)]
struct Envelope {
    /// Set when the provider could not serve the request.
    #[serde(default)]
    error: bool,

    #[serde(default)]
    msg: String,

    #[serde(default)]
    data: Vec<Value>,
}

impl Envelope {
    /// Decode every well-formed entry, skipping the rest.
    ///
    /// A malformed record for one country must not hide the records of
    /// every other country; only the entry that gets joined has to parse.
    fn into_records<T: DeserializeOwned>(self, path: &str) -> Result<Vec<T>, ProviderError> {
        if self.error {
            return Err(ProviderError::Rejected {
                provider: PROVIDER,
                message: self.msg,
            });
        }

        let total = self.data.len();
        let records: Vec<T> = self
            .data
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();

        if records.len() < total {
            debug!(
                path = %path,
                skipped = total - records.len(),
                "Skipped malformed dataset entries"
            );
        }

        Ok(records)
    }
}
