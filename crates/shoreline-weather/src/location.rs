//! Location providers.
//!
//! A provider answers "where is the visitor?" once per panel load. Positions
//! are never cached between requests, so `maximum_age` is always honoured.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use shoreline_core::{LocationConfig, LocationSource};

use crate::types::{Coordinates, LocationError, WeatherError};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Options passed with every position request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeolocationOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    pub maximum_age: Duration,
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_millis(5000),
            maximum_age: Duration::ZERO,
        }
    }
}

impl From<&LocationConfig> for GeolocationOptions {
    fn from(config: &LocationConfig) -> Self {
        Self {
            high_accuracy: config.high_accuracy,
            timeout: Duration::from_millis(config.timeout_ms),
            maximum_age: Duration::from_millis(config.maximum_age_ms),
        }
    }
}

/// Source of the visitor's coordinates
pub trait LocationProvider: Send + Sync + 'static {
    fn current_location(
        &self,
        options: &GeolocationOptions,
    ) -> impl Future<Output = Result<Coordinates, LocationError>> + Send;
}

/// Ask `provider` for a position, giving up after `options.timeout`.
pub async fn locate<P: LocationProvider>(
    provider: &P,
    options: &GeolocationOptions,
) -> Result<Coordinates, LocationError> {
    match tokio::time::timeout(options.timeout, provider.current_location(options)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Location request timed out after {:?}", options.timeout);
            Err(LocationError::Timeout)
        }
    }
}

/// Always answers with the same coordinates
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    coordinates: Coordinates,
}

impl FixedLocation {
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

impl LocationProvider for FixedLocation {
    async fn current_location(
        &self,
        _options: &GeolocationOptions,
    ) -> Result<Coordinates, LocationError> {
        Ok(self.coordinates)
    }
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Coarse position from an IP geolocation service
#[derive(Debug, Clone)]
pub struct IpLocation {
    client: Client,
    lookup_url: String,
}

impl IpLocation {
    pub fn new(lookup_url: impl Into<String>) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            lookup_url: lookup_url.into(),
        })
    }
}

impl LocationProvider for IpLocation {
    async fn current_location(
        &self,
        options: &GeolocationOptions,
    ) -> Result<Coordinates, LocationError> {
        if options.high_accuracy {
            tracing::debug!("High accuracy requested; IP lookup is city-level at best");
        }

        let response = self
            .client
            .get(&self.lookup_url)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("IP location request failed: {}", e);
                LocationError::ServiceUnavailable
            })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(LocationError::PermissionDenied);
            }
            status => {
                tracing::debug!("IP location lookup returned status {}", status);
                return Err(LocationError::ServiceUnavailable);
            }
        }

        let body: IpLookupResponse = response
            .json()
            .await
            .map_err(|e| LocationError::Other(format!("Invalid lookup response: {}", e)))?;

        match (body.latitude, body.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates::new(latitude, longitude)),
            _ => Err(LocationError::Other(
                "Lookup response missing coordinates".to_string(),
            )),
        }
    }
}

/// The provider chosen in the `[location]` config section
#[derive(Debug, Clone)]
pub enum ConfiguredLocation {
    Fixed(FixedLocation),
    Ip(IpLocation),
}

impl ConfiguredLocation {
    pub fn from_config(config: &LocationConfig) -> Result<Self, WeatherError> {
        Ok(match config.provider {
            LocationSource::Fixed => Self::Fixed(FixedLocation::new(Coordinates::new(
                config.latitude,
                config.longitude,
            ))),
            LocationSource::Ip => Self::Ip(IpLocation::new(config.lookup_url.clone())?),
        })
    }
}

impl LocationProvider for ConfiguredLocation {
    async fn current_location(
        &self,
        options: &GeolocationOptions,
    ) -> Result<Coordinates, LocationError> {
        match self {
            Self::Fixed(provider) => provider.current_location(options).await,
            Self::Ip(provider) => provider.current_location(options).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverResolves;

    impl LocationProvider for NeverResolves {
        async fn current_location(
            &self,
            _options: &GeolocationOptions,
        ) -> Result<Coordinates, LocationError> {
            std::future::pending().await
        }
    }

    #[test]
    fn test_default_options() {
        let options = GeolocationOptions::default();
        assert!(options.high_accuracy);
        assert_eq!(options.timeout, Duration::from_millis(5000));
        assert_eq!(options.maximum_age, Duration::ZERO);
    }

    #[test]
    fn test_options_from_config() {
        let options = GeolocationOptions::from(&LocationConfig::default());
        assert_eq!(options, GeolocationOptions::default());
    }

    #[tokio::test]
    async fn test_fixed_location() {
        let provider = FixedLocation::new(Coordinates::new(1.30, 103.80));
        let coords = locate(&provider, &GeolocationOptions::default()).await.unwrap();
        assert_eq!(coords, Coordinates::new(1.30, 103.80));
    }

    #[tokio::test(start_paused = true)]
    async fn test_locate_times_out() {
        let started = tokio::time::Instant::now();
        let result = locate(&NeverResolves, &GeolocationOptions::default()).await;

        assert!(matches!(result, Err(LocationError::Timeout)));
        assert!(started.elapsed() >= Duration::from_millis(5000));
    }

    #[test]
    fn test_configured_fixed() {
        let provider = ConfiguredLocation::from_config(&LocationConfig::default()).unwrap();
        assert!(matches!(provider, ConfiguredLocation::Fixed(_)));
    }
}
