//! HTTP API handlers for Country Lens.
//!
//! - **GET /countries**: every country known to the directory provider
//! - **GET /countries/:country_code**: merged profile for one country
//! - **GET /**: liveness text
//! - **GET /health**: empty 200
//!
//! Anything else answers 404 with `{"message":"Route not found"}`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument};

use crate::aggregation::CountryAggregator;
use crate::config::AppConfig;
use crate::data_sources::{CountriesNowClient, NagerClient};
use crate::directory::CountryDirectory;
use crate::error::AppError;
use crate::model::{CountryProfile, CountrySummary, ErrorBody};

/// Application state shared across handlers.
///
/// Holds only immutable provider handles; no request state is shared.
#[derive(Clone)]
pub struct AppState {
    pub directory: CountryDirectory,
    pub aggregator: CountryAggregator,
}

impl AppState {
    /// Wire the real upstream clients from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        let nager = Arc::new(NagerClient::with_base_url(&config.nager_base_url));
        let countries_now = Arc::new(CountriesNowClient::with_base_url(
            &config.countries_now_base_url,
        ));

        Self {
            directory: CountryDirectory::new(nager.clone()),
            aggregator: CountryAggregator::new(nager, countries_now.clone(), countries_now),
        }
    }
}

/// Build the full router, including CORS and request tracing.
pub fn router(state: AppState, allowed_origin: Option<HeaderValue>) -> Router {
    let cors = match allowed_origin {
        Some(origin) => CorsLayer::new().allow_origin(origin),
        None => CorsLayer::new().allow_origin(Any),
    }
    .allow_methods([Method::GET]);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/countries", get(list_countries))
        .route("/countries/:country_code", get(get_country))
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// GET /countries - List available countries.
///
/// # Response
///
/// ```json
/// [
///     { "countryCode": "AD", "name": "Andorra" },
///     { "countryCode": "AL", "name": "Albania" }
/// ]
/// ```
///
/// Returns `500 {"message":"Error fetching countries"}` if the directory
/// provider is unavailable.
#[instrument(skip(state))]
pub async fn list_countries(
    State(state): State<AppState>,
) -> Result<Json<Vec<CountrySummary>>, AppError> {
    let countries = state.directory.list_countries().await?;

    info!(country_count = countries.len(), "Countries listed");

    Ok(Json(countries))
}

/// GET /countries/:country_code - Get the merged profile for a country.
///
/// # Response
///
/// ```json
/// {
///     "commonName": "Germany",
///     "officialName": "Federal Republic of Germany",
///     "countryCode": "DE",
///     "region": "Europe",
///     "borders": [
///         { "commonName": "France", "officialName": "French Republic", "countryCode": "FR", "region": "Europe" }
///     ],
///     "population": [{ "year": 2018, "value": 82927922 }],
///     "flag": "https://upload.wikimedia.org/wikipedia/en/b/ba/Flag_of_Germany.svg"
/// }
/// ```
///
/// `population` is `[]` and `flag` is `null` when those lookups degrade.
/// Unknown codes return `404 {"message":"Country not found"}`.
#[instrument(skip(state))]
pub async fn get_country(
    State(state): State<AppState>,
    Path(country_code): Path<String>,
) -> Result<Json<CountryProfile>, AppError> {
    let profile = state.aggregator.get_profile(&country_code).await?;

    info!(
        country = %profile.country_code,
        borders = profile.borders.len(),
        population_samples = profile.population.len(),
        has_flag = profile.flag.is_some(),
        "Country profile served"
    );

    Ok(Json(profile))
}

/// GET / - Liveness text.
pub async fn root() -> &'static str {
    "Running"
}

/// GET /health - Simple health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Fallback for unmatched routes.
pub async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Route not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_sources::{
        MockDirectoryProvider, MockFlagProvider, MockIdentityProvider, MockPopulationProvider,
    };
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use tower::ServiceExt;

    fn idle_state() -> AppState {
        AppState {
            directory: CountryDirectory::new(Arc::new(MockDirectoryProvider::new())),
            aggregator: CountryAggregator::new(
                Arc::new(MockIdentityProvider::new()),
                Arc::new(MockPopulationProvider::new()),
                Arc::new(MockFlagProvider::new()),
            ),
        }
    }

    #[tokio::test]
    async fn test_unmatched_route_is_json_404() {
        let app = router(idle_state(), None);

        let response = app
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, ErrorBody::new("Route not found"));
    }

    #[tokio::test]
    async fn test_cors_echoes_configured_origin() {
        let origin = HeaderValue::from_static("http://localhost:3000");
        let app = router(idle_state(), Some(origin.clone()));

        let response = app
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&origin)
        );
    }

    #[tokio::test]
    async fn test_cors_defaults_to_any_origin() {
        let app = router(idle_state(), None);

        let response = app
            .oneshot(
                Request::get("/")
                    .header(header::ORIGIN, "http://elsewhere.test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("*"))
        );
    }
}
