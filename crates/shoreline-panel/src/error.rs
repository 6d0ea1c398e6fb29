//! Failures that collapse a panel into its error view.
//!
//! Marine and UV failures never appear here; their providers absorb them.

use shoreline_weather::{LocationError, WeatherError};

#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("Location unavailable: {0}")]
    LocationUnavailable(#[from] LocationError),

    #[error("Weather fetch failed: {0}")]
    WeatherFetchFailed(WeatherError),

    #[error("Forecast fetch failed: {0}")]
    ForecastFetchFailed(WeatherError),
}
