use crate::error::{AppError, Result};
use crate::models::{Coordinates, WeatherReading};
use reqwest::Client;
use serde::Deserialize;

const PROVIDER: &str = "OpenWeatherMap";

/// Resolves a location to a normalized [`WeatherReading`] via the
/// OpenWeatherMap current-weather and direct-geocoding endpoints.
#[derive(Debug, Clone)]
pub struct WeatherResolver {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    #[serde(default)]
    name: String,
    main: CurrentWeatherMain,
    #[serde(default)]
    weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    description: Option<String>,
    main: Option<String>,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeEntry {
    name: String,
    lat: f64,
    lon: f64,
}

impl WeatherResolver {
    pub fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Geocode a city name, then read the weather at the resolved point.
    /// The reading echoes the geocoder's display name rather than whatever
    /// place the weather endpoint reports for the nearest station.
    pub async fn by_city(&self, city: &str) -> Result<WeatherReading> {
        let city = city.trim();
        if city.is_empty() {
            return Err(AppError::Validation("city name must not be empty".to_string()));
        }

        let (name, coords) = self.geocode(city).await?;
        let mut reading = self.fetch_current(coords).await?;
        reading.city = name;
        Ok(reading)
    }

    /// Weather lookup by raw coordinates. Both must be present and finite;
    /// validation happens before any network call.
    pub async fn by_coordinates(&self, lat: Option<f64>, lon: Option<f64>) -> Result<WeatherReading> {
        let coords = match (lat, lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Coordinates { lat, lon }
            }
            _ => {
                return Err(AppError::Validation(
                    "lat and lon query params required".to_string(),
                ))
            }
        };

        self.fetch_current(coords).await
    }

    async fn geocode(&self, city: &str) -> Result<(String, Coordinates)> {
        let url = format!("{}/geo/1.0/direct", self.base_url);

        tracing::debug!("Geocoding {:?}", city);

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("limit", "1"), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                provider: PROVIDER,
                source: e,
            })?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamStatus {
                provider: PROVIDER,
                status: response.status().as_u16(),
            });
        }

        let entries: Vec<GeocodeEntry> =
            response.json().await.map_err(|e| AppError::Upstream {
                provider: PROVIDER,
                source: e,
            })?;

        let entry = entries
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("no location found for '{}'", city)))?;

        Ok((
            entry.name,
            Coordinates {
                lat: entry.lat,
                lon: entry.lon,
            },
        ))
    }

    async fn fetch_current(&self, coords: Coordinates) -> Result<WeatherReading> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coords.lat.to_string()),
                ("lon", coords.lon.to_string()),
                ("units", "metric".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                provider: PROVIDER,
                source: e,
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::error!("Weather request failed with status {}", status);
            return Err(AppError::UpstreamStatus {
                provider: PROVIDER,
                status,
            });
        }

        let body: CurrentWeatherResponse =
            response.json().await.map_err(|e| AppError::Upstream {
                provider: PROVIDER,
                source: e,
            })?;

        Ok(normalize(body))
    }
}

fn normalize(body: CurrentWeatherResponse) -> WeatherReading {
    let description = body.weather.first().map(describe).unwrap_or_default();

    WeatherReading {
        city: body.name,
        temperature: body.main.temp.round() as i32,
        description,
    }
}

/// Prefer the free-text summary; some responses carry only a condition or
/// icon code, which gets its separators replaced to stay readable.
fn describe(condition: &WeatherCondition) -> String {
    if let Some(description) = condition.description.as_deref().filter(|d| !d.is_empty()) {
        return description.to_lowercase();
    }

    condition
        .main
        .as_deref()
        .or(condition.icon.as_deref())
        .unwrap_or_default()
        .to_lowercase()
        .replace(['_', '-'], " ")
}
