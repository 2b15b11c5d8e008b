pub mod playlist;
pub mod weather;

pub use playlist::{PlaylistSummary, WeatherPlaylist};
pub use weather::{Coordinates, WeatherReading};
