//! Nager.Date client.
//!
//! Nager.Date is a public holiday API that also publishes a country
//! directory and per-country identity records with their land borders.
//!
//! # API Reference
//!
//! See: <https://date.nager.at/Api>
//!
//! # Endpoints Used
//!
//! - `GET /AvailableCountries` - every supported country as `{countryCode, name}`
//! - `GET /CountryInfo/{code}` - common/official name, region and borders

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{DirectoryProvider, IdentityProvider, ProviderError};
use crate::model::{CountryIdentity, CountrySummary};

/// Base URL for the Nager.Date API.
pub const NAGER_API_BASE: &str = "https://date.nager.at/api/v3";

const PROVIDER: &str = "nager.date";

/// Client for the Nager.Date country endpoints.
#[derive(Clone)]
pub struct NagerClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for NagerClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NagerClient {
    /// Create a new client against the public API.
    pub fn new() -> Self {
        Self::with_base_url(NAGER_API_BASE)
    }

    /// Create a client with a custom base URL (for testing or mirrors).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn available_countries_url(&self) -> String {
        format!("{}/AvailableCountries", self.base_url)
    }

    fn country_info_url(&self, country_code: &str) -> String {
        format!(
            "{}/CountryInfo/{}",
            self.base_url,
            urlencoding::encode(country_code)
        )
    }
}

#[async_trait]
impl DirectoryProvider for NagerClient {
    async fn available_countries(&self) -> Result<Vec<CountrySummary>, ProviderError> {
        let response = self
            .client
            .get(self.available_countries_url())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(ProviderError::transport(PROVIDER))?;

        response
            .json::<Vec<CountrySummary>>()
            .await
            .map_err(ProviderError::transport(PROVIDER))
    }
}

#[async_trait]
impl IdentityProvider for NagerClient {
    /// Fetch the identity record for `country_code`.
    ///
    /// Unknown codes come back as 404 (or occasionally 204 / an empty body)
    /// and are reported as `Ok(None)` rather than an error.
    async fn country_info(
        &self,
        country_code: &str,
    ) -> Result<Option<CountryIdentity>, ProviderError> {
        let response = self
            .client
            .get(self.country_info_url(country_code))
            .send()
            .await
            .map_err(ProviderError::transport(PROVIDER))?;

        if matches!(
            response.status(),
            StatusCode::NOT_FOUND | StatusCode::NO_CONTENT
        ) {
            return Ok(None);
        }

        let body = response
            .error_for_status()
            .map_err(ProviderError::transport(PROVIDER))?
            .text()
            .await
            .map_err(ProviderError::transport(PROVIDER))?;

        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str::<Option<CountryIdentity>>(&body).map_err(|source| {
            ProviderError::Decode {
                provider: PROVIDER,
                source,
            }
        })
    }
}
