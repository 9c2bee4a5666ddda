//! Text shaping for the weather panel.
//!
//! Every render sink shows the same strings, so formatting lives next to the
//! data rather than in each sink.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::types::{AirQualitySample, ForecastEntry, WeatherSnapshot};

/// Location label shown before any search and after a reset.
pub const IDLE_LOCATION_LABEL: &str = "Search a city to explore";

const PLACEHOLDER_CLOCK: &str = "--:--";

/// Round half up, matching how the dashboard has always rounded.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn format_temperature(celsius: f64) -> String {
    format!("{}°", round_half_up(celsius))
}

/// `"6:42 AM"`, or `"6 AM"` with `hour_only`, in the location's local time.
pub fn format_clock(epoch_seconds: i64, offset_secs: i32, hour_only: bool) -> String {
    let Some(local) = local_time(epoch_seconds, offset_secs) else {
        return PLACEHOLDER_CLOCK.to_string();
    };
    if hour_only {
        local.format("%-I %p").to_string()
    } else {
        local.format("%-I:%M %p").to_string()
    }
}

/// Short weekday name (`"Mon"`) in the location's local time.
pub fn format_weekday(epoch_seconds: i64, offset_secs: i32) -> String {
    local_time(epoch_seconds, offset_secs)
        .map(|t| t.format("%a").to_string())
        .unwrap_or_else(|| "--".to_string())
}

fn local_time(epoch_seconds: i64, offset_secs: i32) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(offset_secs)?;
    DateTime::from_timestamp(epoch_seconds, 0).map(|utc| utc.with_timezone(&offset))
}

/// Friendly one-liner for the current conditions.
pub fn personal_suggestion(condition: &str, temperature_c: f64) -> &'static str {
    if condition.contains("Rain") || condition.contains("Storm") || condition.contains("Drizzle") {
        "Perfect weather to stay in and code."
    } else if condition.contains("Clear") && temperature_c > 25.0 {
        "Beautiful, sunny day! Don't forget to stay hydrated."
    } else if condition.contains("Clear") && temperature_c < 10.0 {
        "Clear but chilly! Bundle up if you go out."
    } else if condition.contains("Snow") {
        "It's snowing! A lovely day to watch from the window."
    } else if condition.contains("Clouds") {
        "A calm, cloudy day. Great for focusing."
    } else {
        "Have a wonderful day!"
    }
}

/// Display strings for the "Now" panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherDisplay {
    pub location: String,
    pub temperature: String,
    pub condition: String,
    pub feels_like: String,
    pub suggestion: String,
    pub humidity: String,
    pub wind: String,
    pub pressure: String,
    pub visibility: String,
    pub sunrise: String,
    pub sunset: String,
}

impl WeatherDisplay {
    pub fn from_snapshot(snapshot: &WeatherSnapshot, display_name: &str) -> Self {
        let offset = snapshot.timezone_offset_secs;
        Self {
            location: display_name.to_string(),
            temperature: format_temperature(snapshot.temperature_c),
            condition: snapshot.condition_label.clone(),
            feels_like: format!("Feels like {}°C", round_half_up(snapshot.feels_like_c)),
            suggestion: personal_suggestion(&snapshot.condition_label, snapshot.temperature_c)
                .to_string(),
            humidity: format!("{}%", snapshot.humidity_pct),
            wind: format!("{} m/s", snapshot.wind_speed_mps),
            pressure: format!("{} hPa", snapshot.pressure_hpa),
            visibility: format!("{:.1} km", f64::from(snapshot.visibility_m) / 1000.0),
            sunrise: format_clock(snapshot.sunrise_epoch, offset, false),
            sunset: format_clock(snapshot.sunset_epoch, offset, false),
        }
    }

    /// Values shown when no weather is loaded or a fetch failed.
    pub fn placeholder() -> Self {
        Self {
            location: IDLE_LOCATION_LABEL.to_string(),
            temperature: "--°".to_string(),
            condition: "--".to_string(),
            feels_like: String::new(),
            suggestion: String::new(),
            humidity: "--%".to_string(),
            wind: "-- m/s".to_string(),
            pressure: "-- hPa".to_string(),
            visibility: "-- km".to_string(),
            sunrise: PLACEHOLDER_CLOCK.to_string(),
            sunset: PLACEHOLDER_CLOCK.to_string(),
        }
    }

    /// Numeric fields (everything except labels) that carry data.
    pub fn numeric_fields(&self) -> [&str; 7] {
        [
            &self.temperature,
            &self.humidity,
            &self.wind,
            &self.pressure,
            &self.visibility,
            &self.sunrise,
            &self.sunset,
        ]
    }
}

/// One tile of the hourly or daily strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastTile {
    pub label: String,
    pub icon_url: String,
    pub description: String,
    pub temperature: String,
}

impl ForecastTile {
    pub fn hourly(entry: &ForecastEntry, offset_secs: i32) -> Self {
        Self {
            label: format_clock(entry.epoch_seconds, offset_secs, true),
            icon_url: icon_url(&entry.condition_icon),
            description: entry.condition_description.clone(),
            temperature: format_temperature(entry.temperature_c),
        }
    }

    pub fn daily(entry: &ForecastEntry, offset_secs: i32) -> Self {
        Self {
            label: format_weekday(entry.epoch_seconds, offset_secs),
            icon_url: icon_url(&entry.condition_icon),
            description: entry.condition_description.clone(),
            temperature: format!("{}°C", round_half_up(entry.temperature_c)),
        }
    }
}

pub fn icon_url(icon: &str) -> String {
    format!("https://openweathermap.org/img/wn/{}.png", icon)
}

/// `("2", "Fair", "PM2.5: 7.25 µg/m³")`
pub fn air_quality_text(sample: &AirQualitySample) -> (String, &'static str, String) {
    let category = sample.level().map(|l| l.label()).unwrap_or("--");
    (
        sample.index.to_string(),
        category,
        format!("PM2.5: {:.2} µg/m³", sample.pm25),
    )
}
