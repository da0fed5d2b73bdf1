//! Country profile assembly.
//!
//! A profile is built in three stages:
//!
//! 1. **Identity**: resolve the country code to names, region and borders.
//!    A miss ends the request with `CountryNotFound` before any other
//!    provider is contacted.
//! 2. **Population**: look up the resolved common name in the full
//!    population dataset.
//! 3. **Flag**: look up the resolved common name in the full flag dataset.
//!
//! Stages 2 and 3 only depend on the name from stage 1, so they run
//! concurrently. Either of them may come back [`Outcome::Unavailable`]
//! (no match, or the provider failed); the profile is still returned with
//! an empty series / `null` flag in that case.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::data_sources::{FlagProvider, IdentityProvider, PopulationProvider, ProviderError};
use crate::error::{AppError, Stage};
use crate::matching::{ExactName, NameMatcher, find_by_name};
use crate::model::{CountryIdentity, CountryProfile, PopulationSample};

/// Result of a stage that is allowed to degrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Resolved(T),
    /// Nothing usable, whether the provider had no entry or failed.
    Unavailable,
}

impl<T> Outcome<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Outcome::Resolved(value) => Some(value),
            Outcome::Unavailable => None,
        }
    }
}

/// Merges identity, population and flag providers into [`CountryProfile`]s.
#[derive(Clone)]
pub struct CountryAggregator {
    identity: Arc<dyn IdentityProvider>,
    population: Arc<dyn PopulationProvider>,
    flags: Arc<dyn FlagProvider>,
    matcher: Arc<dyn NameMatcher>,
}

impl CountryAggregator {
    /// Create an aggregator that joins on exact names.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        population: Arc<dyn PopulationProvider>,
        flags: Arc<dyn FlagProvider>,
    ) -> Self {
        Self {
            identity,
            population,
            flags,
            matcher: Arc::new(ExactName),
        }
    }

    /// Replace the strategy used to join the population and flag datasets.
    pub fn with_matcher(mut self, matcher: Arc<dyn NameMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Build the profile for `country_code`.
    ///
    /// # Errors
    ///
    /// - [`AppError::CountryNotFound`] if the identity provider has no record
    ///   or the record has no common name
    /// - [`AppError::Upstream`] if the identity provider itself failed
    ///
    /// Population and flag failures never surface here.
    pub async fn get_profile(&self, country_code: &str) -> Result<CountryProfile, AppError> {
        let identity = self.resolve_identity(country_code).await?;

        let (population, flag) = tokio::join!(
            self.resolve_population(&identity.common_name),
            self.resolve_flag(&identity.common_name),
        );

        Ok(merge(identity, population, flag))
    }

    async fn resolve_identity(&self, country_code: &str) -> Result<CountryIdentity, AppError> {
        match self.identity.country_info(country_code).await {
            Ok(Some(identity)) if identity.has_common_name() => Ok(identity),
            Ok(_) => Err(AppError::CountryNotFound {
                code: country_code.to_string(),
            }),
            Err(source) => {
                warn!(
                    stage = %Stage::Identity,
                    country = %country_code,
                    error = %source,
                    "Identity lookup failed"
                );
                Err(AppError::Upstream {
                    stage: Stage::Identity,
                    source,
                })
            }
        }
    }

    async fn resolve_population(&self, name: &str) -> Outcome<Vec<PopulationSample>> {
        let lookup = self.population.population_records().await.map(|records| {
            find_by_name(self.matcher.as_ref(), name, &records, |r| r.country.as_str())
                .map(|record| record.population_counts.clone())
        });

        settle(Stage::Population, name, lookup)
    }

    async fn resolve_flag(&self, name: &str) -> Outcome<String> {
        let lookup = self.flags.flag_records().await.map(|records| {
            find_by_name(self.matcher.as_ref(), name, &records, |r| r.name.as_str())
                .map(|record| record.flag.clone())
        });

        settle(Stage::Flag, name, lookup)
    }
}

/// Collapse a degradable lookup into an [`Outcome`], logging why it degraded.
fn settle<T>(stage: Stage, country: &str, lookup: Result<Option<T>, ProviderError>) -> Outcome<T> {
    match lookup {
        Ok(Some(value)) => Outcome::Resolved(value),
        Ok(None) => {
            debug!(stage = %stage, country = %country, "No matching entry");
            Outcome::Unavailable
        }
        Err(e) => {
            warn!(
                stage = %stage,
                country = %country,
                error = %e,
                "Stage degraded after upstream failure"
            );
            Outcome::Unavailable
        }
    }
}

/// Field selection only; nothing is re-derived or cross-checked.
fn merge(
    identity: CountryIdentity,
    population: Outcome<Vec<PopulationSample>>,
    flag: Outcome<String>,
) -> CountryProfile {
    CountryProfile {
        common_name: identity.common_name,
        official_name: identity.official_name,
        country_code: identity.country_code,
        region: identity.region,
        borders: identity.borders,
        population: population.into_option().unwrap_or_default(),
        flag: flag.into_option(),
    }
}
