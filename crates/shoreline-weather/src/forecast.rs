//! Four-day textual outlook from data.gov.sg (no API key required).

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use shoreline_core::ForecastConfig;
use tracing::instrument;

use crate::types::{ForecastDay, WeatherError};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const SERVICE: &str = "data.gov.sg";
const OUTLOOK_DAYS: usize = 4;

#[derive(Debug, Deserialize)]
struct OutlookResponse {
    #[serde(default)]
    items: Vec<OutlookItem>,
}

#[derive(Debug, Deserialize)]
struct OutlookItem {
    #[serde(default)]
    forecasts: Vec<ApiForecast>,
}

#[derive(Debug, Deserialize)]
struct ApiForecast {
    date: String,
    forecast: String,
    relative_humidity: Range,
    temperature: Range,
    wind: ApiWind,
}

#[derive(Debug, Deserialize)]
struct ApiWind {
    speed: Range,
    direction: String,
}

#[derive(Debug, Deserialize)]
struct Range {
    low: f64,
    high: f64,
}

impl ApiForecast {
    fn into_day(self) -> Result<ForecastDay, WeatherError> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| WeatherError::Parse(format!("bad forecast date {:?}: {}", self.date, e)))?;

        Ok(ForecastDay {
            date,
            description: self.forecast,
            temp_high_c: self.temperature.high,
            temp_low_c: self.temperature.low,
            humidity_range: format!(
                "{} - {}%",
                self.relative_humidity.low, self.relative_humidity.high
            ),
            wind_speed_range: format!("{} - {} km/h", self.wind.speed.low, self.wind.speed.high),
            wind_direction: self.wind.direction,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ForecastProvider {
    client: Client,
    base_url: String,
}

impl ForecastProvider {
    pub fn new(config: &ForecastConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The next four days, in date order as published.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_outlook(&self) -> Result<Vec<ForecastDay>, WeatherError> {
        let url = format!("{}/4-day-weather-forecast", self.base_url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(WeatherError::Status {
                service: SERVICE,
                status: response.status().as_u16(),
            });
        }

        let body: OutlookResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let item = body
            .items
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Parse("outlook has no items".to_string()))?;

        if item.forecasts.is_empty() {
            return Err(WeatherError::Parse("outlook has no forecasts".to_string()));
        }

        item.forecasts
            .into_iter()
            .take(OUTLOOK_DAYS)
            .map(ApiForecast::into_day)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_into_day() {
        let api: ApiForecast = serde_json::from_value(serde_json::json!({
            "date": "2026-10-20",
            "forecast": "Afternoon thunderstorms",
            "relative_humidity": { "low": 55, "high": 95 },
            "temperature": { "low": 25, "high": 33 },
            "wind": { "speed": { "low": 10, "high": 20 }, "direction": "NNE" }
        }))
        .unwrap();

        let day = api.into_day().unwrap();
        assert_eq!(day.date, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
        assert_eq!(day.humidity_range, "55 - 95%");
        assert_eq!(day.wind_speed_range, "10 - 20 km/h");
        assert_eq!(day.temp_high_c, 33.0);
        assert_eq!(day.wind_direction, "NNE");
    }

    #[test]
    fn test_bad_date_is_parse_error() {
        let api: ApiForecast = serde_json::from_value(serde_json::json!({
            "date": "tomorrow",
            "forecast": "Fair",
            "relative_humidity": { "low": 55, "high": 95 },
            "temperature": { "low": 25, "high": 33 },
            "wind": { "speed": { "low": 10, "high": 20 }, "direction": "N" }
        }))
        .unwrap();

        assert!(matches!(api.into_day(), Err(WeatherError::Parse(_))));
    }
}
