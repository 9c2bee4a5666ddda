//! Forward geocoding: turn a typed city name into candidate locations.
//! Uses the provider's `/geo/1.0/direct` endpoint.

use serde::Deserialize;
use tracing::instrument;

use crate::error::ProviderError;
use crate::http::ApiClient;
use crate::types::Location;

/// Maximum number of suggestions requested.
pub const SUGGESTION_LIMIT: u8 = 5;

#[derive(Debug, Deserialize)]
struct ApiPlace {
    name: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl ApiPlace {
    /// "Name, State, Country", skipping empty parts.
    fn display_name(&self) -> String {
        [Some(self.name.as_str()), self.state.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone)]
pub struct GeocodingClient {
    api: ApiClient,
}

impl GeocodingClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Candidate locations for `query`, best match first.
    ///
    /// Results with out-of-range coordinates are dropped.
    #[instrument(skip(self), level = "info")]
    pub async fn search(&self, query: &str, limit: u8) -> Result<Vec<Location>, ProviderError> {
        let path = format!(
            "/geo/1.0/direct?q={}&limit={}&appid={}",
            urlencoding::encode(query.trim()),
            limit,
            self.api.encoded_key()
        );
        let places: Vec<ApiPlace> = self.api.get_json(&path).await?;

        let locations = places
            .into_iter()
            .filter_map(|place| {
                match Location::validated(place.display_name(), place.lat, place.lon) {
                    Ok(loc) => Some(loc),
                    Err(e) => {
                        tracing::warn!("Skipping geocoding result {:?}: {}", place.name, e);
                        None
                    }
                }
            })
            .collect::<Vec<_>>();

        tracing::info!("Geocoded {:?} to {} locations", query, locations.len());
        Ok(locations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(json: serde_json::Value) -> ApiPlace {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_display_name_with_state() {
        let p = place(serde_json::json!({
            "name": "Portland", "lat": 45.5, "lon": -122.6, "state": "Oregon", "country": "US"
        }));
        assert_eq!(p.display_name(), "Portland, Oregon, US");
    }

    #[test]
    fn test_display_name_without_state() {
        let p = place(serde_json::json!({
            "name": "London", "lat": 51.5, "lon": -0.12, "country": "GB"
        }));
        assert_eq!(p.display_name(), "London, GB");
    }

    #[test]
    fn test_display_name_blank_state_skipped() {
        let p = place(serde_json::json!({
            "name": "Lima", "lat": -12.04, "lon": -77.04, "state": " ", "country": "PE"
        }));
        assert_eq!(p.display_name(), "Lima, PE");
    }
}
