pub mod aggregator;
pub mod mood;
pub mod playlist;
pub mod spotify_auth;
pub mod weather;

pub use aggregator::Aggregator;
pub use playlist::PlaylistResolver;
pub use spotify_auth::SpotifyAuth;
pub use weather::WeatherResolver;
