//! Weather and beach-conditions data for Shoreline
//!
//! Current weather and UV index via OpenWeather, marine data via Stormglass,
//! a four-day outlook via data.gov.sg, and pluggable location providers.

pub mod types;
pub mod forecast;
pub mod location;
pub mod marine;
pub mod provider;

pub use types::*;
pub use forecast::ForecastProvider;
pub use location::{
    locate, ConfiguredLocation, FixedLocation, GeolocationOptions, IpLocation, LocationProvider,
};
pub use marine::MarineProvider;
pub use provider::WeatherProvider;
