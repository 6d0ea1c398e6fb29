//! Stormglass marine data: wave height, water temperature and tide.
//!
//! Failures never leave this module. Anything that goes wrong is logged and
//! replaced with "N/A" sentinels so the panel can still render.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shoreline_core::MarineConfig;
use tracing::instrument;

use crate::types::{BeachConditions, Coordinates, Measurement, TideStatus, WeatherError};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const SERVICE: &str = "Stormglass";
const PARAMS: &str = "waveHeight,waterTemperature,currentSpeed";

#[derive(Debug, Deserialize)]
struct PointResponse {
    #[serde(default)]
    hours: Vec<HourEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HourEntry {
    wave_height: Option<SourceValues>,
    water_temperature: Option<SourceValues>,
    current_speed: Option<SourceValues>,
}

/// Per-source readings; only NOAA is consulted.
#[derive(Debug, Deserialize)]
struct SourceValues {
    noaa: Option<f64>,
}

fn noaa(values: Option<SourceValues>) -> Option<f64> {
    values.and_then(|v| v.noaa)
}

impl From<HourEntry> for BeachConditions {
    fn from(hour: HourEntry) -> Self {
        Self {
            wave_height_m: Measurement::from(noaa(hour.wave_height)),
            water_temp_c: Measurement::from(noaa(hour.water_temperature)),
            tide_status: noaa(hour.current_speed)
                .map_or(TideStatus::Unavailable, TideStatus::classify),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MarineProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl MarineProvider {
    pub fn new(config: &MarineConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Beach conditions at `coords`. Never fails; see module docs.
    pub async fn fetch_conditions(&self, coords: &Coordinates) -> BeachConditions {
        match self.try_fetch(coords).await {
            Ok(conditions) => conditions,
            Err(e) => {
                tracing::warn!("Marine data unavailable, using sentinels: {}", e);
                BeachConditions::unavailable()
            }
        }
    }

    #[instrument(skip(self), level = "info")]
    async fn try_fetch(&self, coords: &Coordinates) -> Result<BeachConditions, WeatherError> {
        let url = format!("{}/weather/point", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lng", coords.longitude.to_string()),
                ("params", PARAMS.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Status {
                service: SERVICE,
                status: response.status().as_u16(),
            });
        }

        let body: PointResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let first = body
            .hours
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Parse("no hourly entries".to_string()))?;

        Ok(first.into())
    }
}
