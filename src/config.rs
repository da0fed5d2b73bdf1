//! Process configuration.
//!
//! Built once at startup and handed to the components that need it;
//! nothing below `main` reads the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `COUNTRY_LENS_PORT` | `5000` |
//! | `COUNTRY_LENS_ALLOWED_ORIGIN` | any origin |
//! | `COUNTRY_LENS_NAGER_URL` | `https://date.nager.at/api/v3` |
//! | `COUNTRY_LENS_COUNTRIES_NOW_URL` | `https://countriesnow.space/api/v0.1` |

use std::env;

use anyhow::Context;
use axum::http::HeaderValue;

use crate::data_sources::countries_now::COUNTRIES_NOW_API_BASE;
use crate::data_sources::nager::NAGER_API_BASE;

/// Default port if not specified via environment variable.
pub const DEFAULT_PORT: u16 = 5000;

pub const PORT_VAR: &str = "COUNTRY_LENS_PORT";
pub const ALLOWED_ORIGIN_VAR: &str = "COUNTRY_LENS_ALLOWED_ORIGIN";
pub const NAGER_URL_VAR: &str = "COUNTRY_LENS_NAGER_URL";
pub const COUNTRIES_NOW_URL_VAR: &str = "COUNTRY_LENS_COUNTRIES_NOW_URL";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,

    /// Origin permitted by CORS. `None` allows any origin.
    pub allowed_origin: Option<HeaderValue>,

    /// Base URL for the directory and identity provider.
    pub nager_base_url: String,

    /// Base URL for the population and flag provider.
    pub countries_now_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            allowed_origin: None,
            nager_base_url: NAGER_API_BASE.to_string(),
            countries_now_base_url: COUNTRIES_NOW_API_BASE.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Unparseable ports fall back to [`DEFAULT_PORT`]; an origin that is
    /// not a valid header value is an error.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = non_empty(PORT_VAR)
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);

        let allowed_origin = non_empty(ALLOWED_ORIGIN_VAR)
            .map(|origin| {
                HeaderValue::from_str(origin.trim())
                    .with_context(|| format!("invalid {ALLOWED_ORIGIN_VAR}: {origin:?}"))
            })
            .transpose()?;

        let nager_base_url = non_empty(NAGER_URL_VAR)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.nager_base_url);

        let countries_now_base_url = non_empty(COUNTRIES_NOW_URL_VAR)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.countries_now_base_url);

        Ok(Self {
            port,
            allowed_origin,
            nager_base_url,
            countries_now_base_url,
        })
    }
}
