use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Number of 3-hour forecast slots shown in the hourly view (~24h).
pub const HOURLY_SLOTS: usize = 8;

/// Hour of the provider time label used to pick one forecast entry per day.
pub const MIDDAY_HOUR: u32 = 12;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components finite and within geographic range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A resolved city: display name plus coordinates.
///
/// Built through [`Location::validated`] at every entry point. A new search
/// produces a new value; locations are never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn validated(
        display_name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, LocationError> {
        let display_name = display_name.into().trim().to_string();
        if display_name.is_empty() {
            return Err(LocationError::EmptyName);
        }
        let location = Self {
            display_name,
            latitude,
            longitude,
        };
        location.check_coordinates()?;
        Ok(location)
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn check_coordinates(&self) -> Result<(), LocationError> {
        if self.coordinates().is_valid() {
            Ok(())
        } else {
            Err(LocationError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// City part of the display name ("London" for "London, England, GB").
    pub fn primary_name(&self) -> &str {
        self.display_name
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or(&self.display_name)
    }
}

/// Location construction errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("Location name is empty")]
    EmptyName,
    #[error("Invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

/// Point-in-time weather reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition_label: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: i32,
    pub visibility_m: i32,
    pub sunrise_epoch: i64,
    pub sunset_epoch: i64,
    /// Shift from UTC for the reported location, in seconds
    pub timezone_offset_secs: i32,
    /// Coordinates the provider resolved the request to
    pub latitude: f64,
    pub longitude: f64,
    /// "City, CC" when the provider reports a place name
    pub place_name: Option<String>,
}

/// One 3-hour forecast slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub epoch_seconds: i64,
    /// Provider's own time label (`dt_txt`)
    pub provider_time: NaiveDateTime,
    pub temperature_c: f64,
    pub condition_icon: String,
    pub condition_description: String,
}

impl ForecastEntry {
    pub fn date(&self) -> NaiveDate {
        self.provider_time.date()
    }

    pub fn is_midday(&self) -> bool {
        let time = self.provider_time.time();
        time.hour() == MIDDAY_HOUR && time.minute() == 0 && time.second() == 0
    }
}

/// Forecast slots in chronological (provider) order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub entries: Vec<ForecastEntry>,
    pub timezone_offset_secs: i32,
}

impl ForecastSeries {
    pub fn new(entries: Vec<ForecastEntry>, timezone_offset_secs: i32) -> Self {
        Self {
            entries,
            timezone_offset_secs,
        }
    }

    /// Next ~24 hours: the first [`HOURLY_SLOTS`] entries.
    pub fn hourly(&self) -> &[ForecastEntry] {
        let end = self.entries.len().min(HOURLY_SLOTS);
        &self.entries[..end]
    }

    /// One midday entry per calendar day, in source order.
    pub fn daily(&self) -> Vec<ForecastEntry> {
        let mut days: Vec<ForecastEntry> = Vec::new();
        for entry in self.entries.iter().filter(|e| e.is_midday()) {
            if days.iter().any(|d| d.date() == entry.date()) {
                continue;
            }
            days.push(entry.clone());
        }
        days
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Air quality index categories (1..=5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiLevel {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

impl AqiLevel {
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::Good),
            2 => Some(Self::Fair),
            3 => Some(Self::Moderate),
            4 => Some(Self::Poor),
            5 => Some(Self::VeryPoor),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }
}

/// Pollutant reading for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySample {
    pub index: u8,
    pub pm25: f64,
}

impl AirQualitySample {
    pub fn level(&self) -> Option<AqiLevel> {
        AqiLevel::from_index(self.index)
    }
}

/// News search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub source_name: String,
    pub url: String,
}
