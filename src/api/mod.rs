pub mod spotify;
pub mod weather;

pub use spotify::spotify_routes;
pub use weather::weather_routes;
