use serde::{Deserialize, Serialize};

use crate::models::WeatherReading;

/// One playlist picked from the music provider's search results.
/// `url` is always a non-empty external link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub url: String,
    pub description: String,
    #[serde(rename = "coverImage", skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

/// Response for the full city → weather → playlist chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherPlaylist {
    pub weather: WeatherReading,
    pub playlist: PlaylistSummary,
}
