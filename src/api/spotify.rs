use crate::error::Result;
use crate::models::{PlaylistSummary, WeatherPlaylist};
use crate::services::Aggregator;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct PlaylistQuery {
    /// Raw weather description, e.g. "light rain". An absent or unknown
    /// value still resolves through the generic mood fallback.
    weather: Option<String>,
}

pub fn spotify_routes() -> Router<Arc<Aggregator>> {
    Router::new()
        .route("/spotify/playlist", get(playlist_for_weather))
        .route("/spotify/playlist/city/:city", get(playlist_for_city))
}

async fn playlist_for_weather(
    State(state): State<Arc<Aggregator>>,
    Query(query): Query<PlaylistQuery>,
) -> Result<Json<PlaylistSummary>> {
    let description = query.weather.unwrap_or_default();
    let playlist = state.playlist_for_description(&description).await?;
    Ok(Json(playlist))
}

async fn playlist_for_city(
    State(state): State<Arc<Aggregator>>,
    Path(city): Path<String>,
) -> Result<Json<WeatherPlaylist>> {
    let result = state.playlist_for_city(&city).await?;
    Ok(Json(result))
}
