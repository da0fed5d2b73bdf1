//! Error taxonomy for the HTTP surface.
//!
//! Only failures that make the whole request unanswerable live here.
//! Degraded population or flag data is not an error; see
//! [`crate::aggregation::Outcome`].

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::data_sources::ProviderError;
use crate::model::ErrorBody;

/// Profile assembly stage, used for error reporting and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Identity,
    Population,
    Flag,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Identity => "identity",
            Stage::Population => "population",
            Stage::Flag => "flag",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Request-level failures, each mapped to one HTTP status.
#[derive(Debug, Error)]
pub enum AppError {
    /// Directory provider unreachable or malformed.
    #[error("country directory unavailable: {0}")]
    DirectoryUnavailable(#[source] ProviderError),

    /// Identity lookup yielded no usable record.
    #[error("country '{code}' not found")]
    CountryNotFound { code: String },

    /// A stage that cannot degrade failed at the transport/provider level.
    #[error("{stage} stage failed: {source}")]
    Upstream {
        stage: Stage,
        #[source]
        source: ProviderError,
    },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DirectoryUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::CountryNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            AppError::DirectoryUnavailable(_) => ErrorBody::new("Error fetching countries"),
            AppError::CountryNotFound { .. } => ErrorBody::new("Country not found"),
            AppError::Upstream { source, .. } => {
                ErrorBody::new("Error fetching country info").with_error(source.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
