//! OpenWeather client: current conditions and UV index.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shoreline_core::WeatherConfig;
use tracing::instrument;

use crate::types::{Coordinates, WeatherError, WeatherSnapshot};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const SERVICE: &str = "OpenWeather";

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    main: MainBlock,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    wind: WindBlock,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    /// m/s with `units=metric`
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct UvResponse {
    value: f64,
}

impl From<CurrentResponse> for WeatherSnapshot {
    fn from(resp: CurrentResponse) -> Self {
        let (description, icon_ref) = resp
            .weather
            .into_iter()
            .next()
            .map(|c| (c.description, c.icon))
            .unwrap_or_default();

        Self {
            temperature_c: resp.main.temp,
            description,
            wind_speed_kmh: resp.wind.speed * 3.6,
            humidity_pct: resp.main.humidity.round().clamp(0.0, 100.0) as u8,
            icon_ref,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherProvider {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Current weather at `coords`, in metric units.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_current(&self, coords: &Coordinates) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!("{}/weather", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("units", "metric".to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Status {
                service: SERVICE,
                status: response.status().as_u16(),
            });
        }

        let body: CurrentResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        Ok(body.into())
    }

    /// UV index at `coords`.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_uv_index(&self, coords: &Coordinates) -> Result<f64, WeatherError> {
        let url = format!("{}/uvi", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Status {
                service: SERVICE,
                status: response.status().as_u16(),
            });
        }

        let body: UvResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        Ok(body.value)
    }
}
