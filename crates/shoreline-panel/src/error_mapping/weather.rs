use crate::error::PanelError;
use shoreline_core::{AppError, ReqwestErrorExt, WeatherError};
use shoreline_weather::WeatherError as ProviderError;

impl From<PanelError> for AppError {
    fn from(e: PanelError) -> Self {
        match e {
            PanelError::LocationUnavailable(e) => {
                AppError::Weather(WeatherError::LocationUnavailable(e.to_string()))
            }
            PanelError::WeatherFetchFailed(ProviderError::Network(e)) => {
                AppError::Network(e.into_network_error())
            }
            PanelError::WeatherFetchFailed(ProviderError::Status { status: 401, .. }) => {
                AppError::Weather(WeatherError::InvalidApiKey)
            }
            PanelError::WeatherFetchFailed(ProviderError::Status { status, .. })
                if status >= 500 =>
            {
                AppError::Weather(WeatherError::ServiceUnavailable)
            }
            PanelError::WeatherFetchFailed(e) => {
                AppError::Weather(WeatherError::ApiError(e.to_string()))
            }
            PanelError::ForecastFetchFailed(e) => {
                AppError::Weather(WeatherError::ForecastUnavailable(e.to_string()))
            }
        }
    }
}
