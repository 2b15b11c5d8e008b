use serde::{Deserialize, Serialize};

/// A geographic point produced by geocoding a place name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Normalized current-weather payload, independent of the upstream
/// provider's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub city: String,
    /// Degrees Celsius, rounded to the nearest integer.
    pub temperature: i32,
    /// Lowercase free text, e.g. "light rain".
    pub description: String,
}
