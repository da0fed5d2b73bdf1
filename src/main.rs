//! Country Lens server.
//!
//! # API Endpoints
//!
//! - `GET /countries` - List available countries
//! - `GET /countries/:country_code` - Merged country profile
//! - `GET /` - Liveness text
//! - `GET /health` - Health check

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use country_lens::api::{AppState, router};
use country_lens::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("country_lens=info".parse()?))
        .init();

    let config = AppConfig::from_env()?;

    info!(
        port = config.port,
        nager = %config.nager_base_url,
        countries_now = %config.countries_now_base_url,
        allowed_origin = ?config.allowed_origin,
        "Starting Country Lens server"
    );

    let state = AppState::from_config(&config);
    let app = router(state, config.allowed_origin.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "Country Lens is listening");

    axum::serve(listener, app).await?;

    Ok(())
}
