//! Presentation boundary.
//!
//! The orchestrator only talks to a [`RenderSink`]; DOM, QML or globe
//! libraries live behind it and keep their own state.

use skycast_weather::display::{air_quality_text, WeatherDisplay};
use skycast_weather::{
    AirQualitySample, ForecastEntry, ForecastSeries, ForecastTile, Location, NewsArticle,
    WeatherSnapshot,
};

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

pub const NEWS_IDLE_MESSAGE: &str = "Search a city to see related news.";

/// Contents of the news region
#[derive(Debug, Clone, PartialEq)]
pub enum NewsView {
    /// No city loaded, or the last one failed.
    Idle,
    Loading { city: String },
    Articles(Vec<NewsArticle>),
    Empty { city: String },
    Unavailable,
}

impl NewsView {
    /// Inline status line; `None` when articles are shown.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Idle => Some(NEWS_IDLE_MESSAGE.to_string()),
            Self::Loading { city } => Some(format!("Loading news for {}...", city)),
            Self::Articles(_) => None,
            Self::Empty { city } => Some(format!("No weather news found for {}.", city)),
            Self::Unavailable => Some("Could not load news.".to_string()),
        }
    }
}

/// Hourly and daily forecast strips
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastView {
    pub hourly: Vec<ForecastEntry>,
    pub daily: Vec<ForecastEntry>,
    pub timezone_offset_secs: i32,
}

impl ForecastView {
    pub fn from_series(series: &ForecastSeries) -> Self {
        Self {
            hourly: series.hourly().to_vec(),
            daily: series.daily(),
            timezone_offset_secs: series.timezone_offset_secs,
        }
    }

    pub fn hourly_tiles(&self) -> Vec<ForecastTile> {
        self.hourly
            .iter()
            .map(|e| ForecastTile::hourly(e, self.timezone_offset_secs))
            .collect()
    }

    pub fn daily_tiles(&self) -> Vec<ForecastTile> {
        self.daily
            .iter()
            .map(|e| ForecastTile::daily(e, self.timezone_offset_secs))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.hourly.is_empty() && self.daily.is_empty()
    }
}

/// Everything the orchestrator can ask the presentation layer to do.
pub trait RenderSink: Send + Sync {
    fn set_loading(&self, loading: bool);

    fn show_weather(&self, snapshot: &WeatherSnapshot, display_name: &str);

    fn show_forecast(&self, forecast: &ForecastView);

    /// `None` hides the air-quality region entirely.
    fn show_air_quality(&self, sample: Option<&AirQualitySample>);

    fn show_news(&self, news: &NewsView);

    fn show_globe_marker(&self, location: &Location);

    fn hide_globe_marker(&self);

    fn notify(&self, message: &str, severity: Severity);

    /// Put every weather field back to its placeholder.
    fn reset_weather_fields(&self);

    /// Replace the location label, e.g. with a failure message.
    fn show_location_message(&self, message: &str);
}

/// Headless sink that renders into the log.
#[derive(Debug, Default)]
pub struct LogSink;

impl RenderSink for LogSink {
    fn set_loading(&self, loading: bool) {
        tracing::debug!(loading, "Weather panel loading state");
    }

    fn show_weather(&self, snapshot: &WeatherSnapshot, display_name: &str) {
        let d = WeatherDisplay::from_snapshot(snapshot, display_name);
        tracing::info!(
            "{}: {} {} ({}), humidity {}, wind {}, pressure {}, visibility {}, sunrise {}, sunset {}",
            d.location,
            d.temperature,
            d.condition,
            d.feels_like,
            d.humidity,
            d.wind,
            d.pressure,
            d.visibility,
            d.sunrise,
            d.sunset
        );
        tracing::info!("{}", d.suggestion);
    }

    fn show_forecast(&self, forecast: &ForecastView) {
        for tile in forecast.hourly_tiles() {
            tracing::info!("  {:>6}  {:>4}  {}", tile.label, tile.temperature, tile.description);
        }
        for tile in forecast.daily_tiles() {
            tracing::info!("  {:>6}  {:>5}  {}", tile.label, tile.temperature, tile.description);
        }
    }

    fn show_air_quality(&self, sample: Option<&AirQualitySample>) {
        if let Some(sample) = sample {
            let (value, category, pollutant) = air_quality_text(sample);
            tracing::info!("Air quality {} ({}), {}", value, category, pollutant);
        }
    }

    fn show_news(&self, news: &NewsView) {
        match news {
            NewsView::Articles(articles) => {
                for article in articles {
                    tracing::info!("News: {} ({}) {}", article.title, article.source_name, article.url);
                }
            }
            other => {
                if let Some(message) = other.message() {
                    tracing::info!("{}", message);
                }
            }
        }
    }

    fn show_globe_marker(&self, location: &Location) {
        tracing::info!(
            "Globe centred on {} ({:.4}, {:.4})",
            location.primary_name(),
            location.latitude,
            location.longitude
        );
    }

    fn hide_globe_marker(&self) {
        tracing::debug!("Globe marker cleared");
    }

    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => tracing::error!("{}", message),
            Severity::Info | Severity::Success => tracing::info!("{}", message),
        }
    }

    fn reset_weather_fields(&self) {
        let d = WeatherDisplay::placeholder();
        tracing::info!("{}: {} {}", d.location, d.temperature, d.condition);
    }

    fn show_location_message(&self, message: &str) {
        tracing::info!("{}", message);
    }
}
