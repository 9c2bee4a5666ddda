//! Air pollution client.

use serde::Deserialize;
use tracing::instrument;

use crate::error::ProviderError;
use crate::http::ApiClient;
use crate::types::{AirQualitySample, AqiLevel, Coordinates};

#[derive(Debug, Deserialize)]
struct ApiAirPollution {
    list: Vec<ApiAirSample>,
}

#[derive(Debug, Deserialize)]
struct ApiAirSample {
    main: ApiAqi,
    components: ApiComponents,
}

#[derive(Debug, Deserialize)]
struct ApiAqi {
    aqi: u8,
}

#[derive(Debug, Deserialize)]
struct ApiComponents {
    pm2_5: f64,
}

impl TryFrom<ApiAirPollution> for AirQualitySample {
    type Error = ProviderError;

    fn try_from(api: ApiAirPollution) -> Result<Self, Self::Error> {
        let sample = api
            .list
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Malformed("air pollution list is empty".into()))?;

        if AqiLevel::from_index(sample.main.aqi).is_none() {
            return Err(ProviderError::Malformed(format!(
                "aqi out of range: {}",
                sample.main.aqi
            )));
        }

        Ok(Self {
            index: sample.main.aqi,
            pm25: sample.components.pm2_5,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AirQualityClient {
    api: ApiClient,
}

impl AirQualityClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[instrument(skip(self), level = "info")]
    pub async fn fetch_air_quality(
        &self,
        coords: &Coordinates,
    ) -> Result<AirQualitySample, ProviderError> {
        let query = format!(
            "/data/2.5/air_pollution?lat={}&lon={}&appid={}",
            coords.latitude,
            coords.longitude,
            self.api.encoded_key()
        );
        let api: ApiAirPollution = self.api.get_json(&query).await?;
        AirQualitySample::try_from(api)
    }
}
