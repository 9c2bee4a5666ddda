//! Current weather and 5-day/3-hour forecast client.

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::instrument;

use crate::error::ProviderError;
use crate::http::ApiClient;
use crate::types::{Coordinates, ForecastEntry, ForecastSeries, WeatherSnapshot};

const PROVIDER_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize)]
struct ApiCurrentWeather {
    coord: ApiCoord,
    weather: Vec<ApiCondition>,
    main: ApiMain,
    visibility: i32,
    wind: ApiWind,
    sys: ApiSys,
    #[serde(default)]
    timezone: i32,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    main: String,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: i32,
}

#[derive(Debug, Deserialize)]
struct ApiWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct ApiSys {
    sunrise: i64,
    sunset: i64,
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiForecast {
    list: Vec<ApiForecastEntry>,
    #[serde(default)]
    city: Option<ApiForecastCity>,
}

#[derive(Debug, Deserialize)]
struct ApiForecastCity {
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct ApiForecastEntry {
    dt: i64,
    dt_txt: String,
    main: ApiForecastMain,
    weather: Vec<ApiForecastCondition>,
}

#[derive(Debug, Deserialize)]
struct ApiForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ApiForecastCondition {
    icon: String,
    #[serde(default)]
    description: String,
}

impl TryFrom<ApiCurrentWeather> for WeatherSnapshot {
    type Error = ProviderError;

    fn try_from(api: ApiCurrentWeather) -> Result<Self, Self::Error> {
        let condition = api
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Malformed("current weather has no conditions".into()))?;

        if api.main.humidity > 100 {
            return Err(ProviderError::Malformed(format!(
                "humidity out of range: {}",
                api.main.humidity
            )));
        }

        let place_name = api.name.filter(|n| !n.trim().is_empty()).map(|name| {
            match api.sys.country.as_deref().filter(|c| !c.is_empty()) {
                Some(country) => format!("{}, {}", name, country),
                None => name,
            }
        });

        Ok(Self {
            temperature_c: api.main.temp,
            feels_like_c: api.main.feels_like,
            condition_label: condition.main,
            humidity_pct: api.main.humidity,
            wind_speed_mps: api.wind.speed,
            pressure_hpa: api.main.pressure,
            visibility_m: api.visibility,
            sunrise_epoch: api.sys.sunrise,
            sunset_epoch: api.sys.sunset,
            timezone_offset_secs: api.timezone,
            latitude: api.coord.lat,
            longitude: api.coord.lon,
            place_name,
        })
    }
}

impl TryFrom<ApiForecastEntry> for ForecastEntry {
    type Error = ProviderError;

    fn try_from(api: ApiForecastEntry) -> Result<Self, Self::Error> {
        let provider_time = NaiveDateTime::parse_from_str(&api.dt_txt, PROVIDER_TIME_FORMAT)
            .map_err(|e| ProviderError::Malformed(format!("bad dt_txt {:?}: {}", api.dt_txt, e)))?;
        let condition = api.weather.into_iter().next().ok_or_else(|| {
            ProviderError::Malformed(format!("forecast slot {} has no conditions", api.dt))
        })?;

        Ok(Self {
            epoch_seconds: api.dt,
            provider_time,
            temperature_c: api.main.temp,
            condition_icon: condition.icon,
            condition_description: condition.description,
        })
    }
}

/// Weather provider: current conditions and forecast.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    api: ApiClient,
}

impl WeatherClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Current conditions at `coords`.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_current_weather(
        &self,
        coords: &Coordinates,
    ) -> Result<WeatherSnapshot, ProviderError> {
        let query = format!(
            "/data/2.5/weather?lat={}&lon={}&units=metric&appid={}",
            coords.latitude,
            coords.longitude,
            self.api.encoded_key()
        );
        let api: ApiCurrentWeather = self.api.get_json(&query).await?;
        WeatherSnapshot::try_from(api)
    }

    /// Current conditions for a city name ("London" or "London,GB").
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_current_weather_by_name(
        &self,
        name: &str,
    ) -> Result<WeatherSnapshot, ProviderError> {
        let query = format!(
            "/data/2.5/weather?q={}&units=metric&appid={}",
            urlencoding::encode(name.trim()),
            self.api.encoded_key()
        );
        let api: ApiCurrentWeather = self.api.get_json(&query).await?;
        WeatherSnapshot::try_from(api)
    }

    /// 5-day forecast in 3-hour slots, in provider order.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_forecast(
        &self,
        coords: &Coordinates,
    ) -> Result<ForecastSeries, ProviderError> {
        let query = format!(
            "/data/2.5/forecast?lat={}&lon={}&units=metric&appid={}",
            coords.latitude,
            coords.longitude,
            self.api.encoded_key()
        );
        let api: ApiForecast = self.api.get_json(&query).await?;

        let entries = api
            .list
            .into_iter()
            .map(ForecastEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let timezone = api.city.map(|c| c.timezone).unwrap_or(0);

        tracing::debug!("Fetched {} forecast slots", entries.len());
        Ok(ForecastSeries::new(entries, timezone))
    }
}
