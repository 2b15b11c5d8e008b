use crate::error::Result;
use crate::models::WeatherReading;
use crate::services::Aggregator;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct CoordsQuery {
    lat: Option<f64>,
    lon: Option<f64>,
}

pub fn weather_routes() -> Router<Arc<Aggregator>> {
    Router::new()
        .route("/weather/coords", get(weather_by_coords))
        .route("/weather/:city", get(weather_by_city))
}

async fn weather_by_coords(
    State(state): State<Arc<Aggregator>>,
    Query(query): Query<CoordsQuery>,
) -> Result<Json<WeatherReading>> {
    let reading = state.weather_by_coordinates(query.lat, query.lon).await?;
    Ok(Json(reading))
}

async fn weather_by_city(
    State(state): State<Arc<Aggregator>>,
    Path(city): Path<String>,
) -> Result<Json<WeatherReading>> {
    let reading = state.weather_by_city(&city).await?;
    Ok(Json(reading))
}
