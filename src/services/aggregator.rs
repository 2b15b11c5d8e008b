use crate::error::Result;
use crate::models::{PlaylistSummary, WeatherPlaylist, WeatherReading};
use crate::services::mood::mood_keywords;
use crate::services::playlist::PlaylistResolver;
use crate::services::spotify_auth::SpotifyAuth;
use crate::services::weather::WeatherResolver;

/// Composes the weather, mood and playlist services; the only entry point
/// the route layer talks to. Each component's error kind passes through
/// untouched so the boundary can pick a response status.
pub struct Aggregator {
    weather: WeatherResolver,
    auth: SpotifyAuth,
    playlists: PlaylistResolver,
}

impl Aggregator {
    pub fn new(weather: WeatherResolver, auth: SpotifyAuth, playlists: PlaylistResolver) -> Self {
        Self {
            weather,
            auth,
            playlists,
        }
    }

    pub async fn weather_by_city(&self, city: &str) -> Result<WeatherReading> {
        self.weather.by_city(city).await
    }

    pub async fn weather_by_coordinates(
        &self,
        lat: Option<f64>,
        lon: Option<f64>,
    ) -> Result<WeatherReading> {
        self.weather.by_coordinates(lat, lon).await
    }

    /// Mood-matched playlist for an already-known weather description.
    pub async fn playlist_for_description(&self, description: &str) -> Result<PlaylistSummary> {
        let keywords = mood_keywords(description);
        tracing::debug!("Mood keywords for {:?}: {:?}", description, keywords);

        let token = self.auth.token().await?;
        self.playlists.resolve(&keywords, &token).await
    }

    /// Full chain: city → weather → mood → playlist.
    pub async fn playlist_for_city(&self, city: &str) -> Result<WeatherPlaylist> {
        let weather = self.weather.by_city(city).await?;
        let playlist = self.playlist_for_description(&weather.description).await?;
        Ok(WeatherPlaylist { weather, playlist })
    }
}
