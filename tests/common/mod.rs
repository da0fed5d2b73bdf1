//! Fake upstream providers served by axum on ephemeral ports.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Serve `app` on 127.0.0.1 and return its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Wrap `data` in the CountriesNow response envelope.
pub fn envelope(data: Value) -> Value {
    json!({ "error": false, "msg": "ok", "data": data })
}

// ============================================================================
// Nager.Date
// ============================================================================

#[derive(Default)]
pub struct FakeNager {
    pub countries: Value,
    pub infos: HashMap<String, Value>,
    pub info_hits: AtomicUsize,
}

impl FakeNager {
    pub fn with_country(mut self, code: &str, info: Value) -> Self {
        self.infos.insert(code.to_string(), info);
        self
    }
}

pub fn nager_router(fake: Arc<FakeNager>) -> Router {
    Router::new()
        .route("/AvailableCountries", get(available_countries))
        .route("/CountryInfo/:code", get(country_info))
        .with_state(fake)
}

async fn available_countries(State(fake): State<Arc<FakeNager>>) -> Json<Value> {
    Json(fake.countries.clone())
}

async fn country_info(State(fake): State<Arc<FakeNager>>, Path(code): Path<String>) -> Response {
    fake.info_hits.fetch_add(1, Ordering::SeqCst);
    match fake.infos.get(&code) {
        Some(info) => Json(info.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

// ============================================================================
// CountriesNow
// ============================================================================

#[derive(Default)]
pub struct FakeCountriesNow {
    pub population: Value,
    pub flags: Value,
    pub population_hits: AtomicUsize,
    pub flag_hits: AtomicUsize,
}

impl FakeCountriesNow {
    pub fn new(population: Value, flags: Value) -> Self {
        Self {
            population: envelope(population),
            flags: envelope(flags),
            ..Self::default()
        }
    }

    pub fn population_hits(&self) -> usize {
        self.population_hits.load(Ordering::SeqCst)
    }

    pub fn flag_hits(&self) -> usize {
        self.flag_hits.load(Ordering::SeqCst)
    }
}

pub fn countries_now_router(fake: Arc<FakeCountriesNow>) -> Router {
    Router::new()
        .route("/countries/population", get(population))
        .route("/countries/flag/images", get(flags))
        .with_state(fake)
}

async fn population(State(fake): State<Arc<FakeCountriesNow>>) -> Json<Value> {
    fake.population_hits.fetch_add(1, Ordering::SeqCst);
    Json(fake.population.clone())
}

async fn flags(State(fake): State<Arc<FakeCountriesNow>>) -> Json<Value> {
    fake.flag_hits.fetch_add(1, Ordering::SeqCst);
    Json(fake.flags.clone())
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn germany_info() -> Value {
    json!({
        "commonName": "Germany",
        "officialName": "Federal Republic of Germany",
        "countryCode": "DE",
        "region": "Europe",
        "borders": [{
            "commonName": "France",
            "officialName": "French Republic",
            "countryCode": "FR",
            "region": "Europe",
            "borders": null
        }]
    })
}

pub fn germany_population() -> Value {
    json!([
        {
            "country": "France",
            "code": "FRA",
            "iso3": "FRA",
            "populationCounts": [{ "year": 2020, "value": 67000000 }]
        },
        {
            "country": "Germany",
            "code": "DEU",
            "iso3": "DEU",
            "populationCounts": [{ "year": 2020, "value": 83000000 }]
        }
    ])
}

pub fn france_flag_only() -> Value {
    json!([{
        "name": "France",
        "flag": "https://flags.test/fr.svg",
        "iso2": "FR",
        "iso3": "FRA"
    }])
}
