//! Data models for Country Lens.
//!
//! Every type here is request-scoped: it is built from upstream responses,
//! serialized once and dropped. Nothing is persisted or cached.
//!
//! All wire types use camelCase field names, matching both the upstream
//! providers and the JSON served to the presentation layer.

use serde::{Deserialize, Serialize};

/// Minimal identifying record used for country listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySummary {
    /// Provider-defined country code (e.g., "DE").
    pub country_code: String,

    /// Display name.
    pub name: String,
}

/// A country as seen from another country's border list.
///
/// Never expanded recursively; any nested `borders` field the provider
/// sends is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderReference {
    #[serde(default)]
    pub common_name: String,

    #[serde(default)]
    pub official_name: String,

    #[serde(default)]
    pub country_code: String,

    #[serde(default)]
    pub region: String,
}

/// Identity and border record returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryIdentity {
    /// Common display name. Empty means the record is unusable.
    #[serde(default)]
    pub common_name: String,

    #[serde(default)]
    pub official_name: String,

    #[serde(default)]
    pub country_code: String,

    #[serde(default)]
    pub region: String,

    /// Neighbouring countries. The provider sends `null` for island nations.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub borders: Vec<BorderReference>,
}

impl CountryIdentity {
    /// Whether this record carries a name the other stages can join on.
    pub fn has_common_name(&self) -> bool {
        !self.common_name.is_empty()
    }
}

/// One point in a country's population time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationSample {
    pub year: i32,
    pub value: i64,
}

/// Population series for one country as listed by the population provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationRecord {
    /// Country name; the only key the provider exposes for joining.
    pub country: String,

    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub iso3: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub population_counts: Vec<PopulationSample>,
}

/// Flag image reference for one country as listed by the flag provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagRecord {
    /// Country name; the only key the provider exposes for joining.
    pub name: String,

    /// Image URL.
    pub flag: String,

    #[serde(default)]
    pub iso2: Option<String>,

    #[serde(default)]
    pub iso3: Option<String>,
}

/// The merged, request-scoped view of one country.
///
/// Field order is fixed so that repeated requests against unchanged
/// upstream data serialize to identical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryProfile {
    pub common_name: String,
    pub official_name: String,
    pub country_code: String,
    pub region: String,
    pub borders: Vec<BorderReference>,

    /// Upstream order, or empty when the population stage degraded.
    pub population: Vec<PopulationSample>,

    /// Flag image URL, or `null` when the flag stage degraded.
    pub flag: Option<String>,
}

/// JSON body returned for every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
