//! Provider clients for SkyCast
//!
//! Current weather, forecast, air quality and geocoding come from an
//! OpenWeatherMap-compatible API; news from a GNews-compatible search API.
//! Every payload is validated at this boundary so callers only ever see
//! complete domain values or a typed [`ProviderError`].

pub mod air_quality;
pub mod display;
pub mod error;
pub mod geocode;
pub mod http;
pub mod news;
pub mod types;
pub mod weather;

pub use air_quality::AirQualityClient;
pub use display::{ForecastTile, WeatherDisplay};
pub use error::ProviderError;
pub use geocode::GeocodingClient;
pub use http::{ApiClient, DEFAULT_TIMEOUT};
pub use news::NewsClient;
pub use types::*;
pub use weather::WeatherClient;
