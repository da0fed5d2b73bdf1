//! Country directory source.
//!
//! A pass-through over the directory provider: the upstream list is
//! returned as-is, with no sorting, filtering or deduplication.

use std::sync::Arc;

use tracing::warn;

use crate::data_sources::DirectoryProvider;
use crate::error::AppError;
use crate::model::CountrySummary;

#[derive(Clone)]
pub struct CountryDirectory {
    provider: Arc<dyn DirectoryProvider>,
}

impl CountryDirectory {
    pub fn new(provider: Arc<dyn DirectoryProvider>) -> Self {
        Self { provider }
    }

    /// List every country known to the directory provider.
    ///
    /// Any upstream failure becomes [`AppError::DirectoryUnavailable`]; there
    /// is no retry and no fallback list.
    pub async fn list_countries(&self) -> Result<Vec<CountrySummary>, AppError> {
        self.provider.available_countries().await.map_err(|e| {
            warn!(error = %e, "Country directory unavailable");
            AppError::DirectoryUnavailable(e)
        })
    }
}
