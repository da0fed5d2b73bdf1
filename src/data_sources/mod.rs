//! Upstream data sources for country metadata.
//!
//! Each provider is reached through a small port trait so that the
//! directory and aggregator can be driven by fakes in tests. The concrete
//! clients are thin reqwest wrappers around public APIs.
//!
//! # Data Sources
//!
//! - [`nager`]: Nager.Date - country directory and identity/border records
//! - [`countries_now`]: CountriesNow - population series and flag images
//!
//! Neither population nor flag endpoints filter by country; they return the
//! whole dataset and the caller does the lookup.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{CountryIdentity, CountrySummary, FlagRecord, PopulationRecord};

pub mod countries_now;
pub mod nager;

pub use countries_now::CountriesNowClient;
pub use nager::NagerClient;

/// Errors raised while talking to an upstream provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network failure, non-success status or undecodable body.
    #[error("request to {provider} failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Body was received but could not be parsed.
    #[error("{provider} returned a malformed body: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Provider answered but flagged the request as failed.
    #[error("{provider} rejected the request: {message}")]
    Rejected {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    pub(crate) fn transport(provider: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Self::Transport { provider, source }
    }
}

/// Lists every country the upstream ecosystem knows about.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryProvider: Send + Sync {
    async fn available_countries(&self) -> Result<Vec<CountrySummary>, ProviderError>;
}

/// Resolves a country code to its identity and border record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Ok(None)` means the provider does not know the code.
    async fn country_info(
        &self,
        country_code: &str,
    ) -> Result<Option<CountryIdentity>, ProviderError>;
}

/// Returns population series for all countries in one call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PopulationProvider: Send + Sync {
    async fn population_records(&self) -> Result<Vec<PopulationRecord>, ProviderError>;
}

/// Returns flag image references for all countries in one call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FlagProvider: Send + Sync {
    async fn flag_records(&self) -> Result<Vec<FlagRecord>, ProviderError>;
}
