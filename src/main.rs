mod api;
mod config;
mod error;
mod models;
mod services;

use crate::config::Config;
use crate::services::{Aggregator, PlaylistResolver, SpotifyAuth, WeatherResolver};
use axum::{
    http::{header, Method},
    routing::get,
    Json, Router,
};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const UPSTREAM_TIMEOUT_SECS: u64 = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,moodcast=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; missing credentials fail here, not mid-request
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // One client for every upstream, with a bounded timeout so a stalled
    // provider cannot hang a request indefinitely
    let client = Client::builder()
        .timeout(Duration::from_secs(UPSTREAM_TIMEOUT_SECS))
        .build()?;

    let weather = WeatherResolver::new(
        client.clone(),
        config.openweather_base_url.clone(),
        config.openweather_key.clone(),
    );
    let auth = SpotifyAuth::new(
        client.clone(),
        &config.spotify_accounts_url,
        config.spotify_client_id.clone(),
        config.spotify_client_secret.clone(),
    );
    let playlists = PlaylistResolver::new(client, config.spotify_api_url.clone());

    let state = Arc::new(Aggregator::new(weather, auth, playlists));

    // Build router
    let app = Router::new()
        .nest(
            "/api",
            Router::new()
                // health check, kept at the API root
                .route("/", get(health))
                .merge(api::weather_routes())
                .merge(api::spotify_routes())
                .with_state(state),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers([header::CONTENT_TYPE]),
        );

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}
