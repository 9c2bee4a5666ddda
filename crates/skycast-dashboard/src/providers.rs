//! Provider client bundle, wired from configuration.

use anyhow::{Context, Result};
use skycast_core::Config;
use skycast_weather::{AirQualityClient, ApiClient, GeocodingClient, NewsClient, WeatherClient};

#[derive(Debug, Clone)]
pub struct Providers {
    pub weather: WeatherClient,
    pub air_quality: AirQualityClient,
    pub geocoding: GeocodingClient,
    pub news: NewsClient,
}

impl Providers {
    /// Weather, air quality and geocoding share one API; news has its own.
    pub fn new(weather_api: ApiClient, news_api: ApiClient) -> Self {
        Self {
            weather: WeatherClient::new(weather_api.clone()),
            air_quality: AirQualityClient::new(weather_api.clone()),
            geocoding: GeocodingClient::new(weather_api),
            news: NewsClient::new(news_api),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = config.http.timeout();

        let weather_api = ApiClient::new(
            &config.weather.base_url,
            config.weather.api_key.as_deref(),
            timeout,
        )
        .context("Failed to create weather API client")?;

        let news_api = ApiClient::new(
            &config.news.base_url,
            config.news.api_key.as_deref(),
            timeout,
        )
        .context("Failed to create news API client")?;

        Ok(Self::new(weather_api, news_api))
    }
}
