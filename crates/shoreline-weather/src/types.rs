use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

/// Geographic position of the visitor
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
}

/// Current weather conditions at the visitor's position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub description: String,
    pub wind_speed_kmh: f64,
    pub humidity_pct: u8,
    /// OpenWeather icon code, e.g. "03d"
    pub icon_ref: String,
}

/// A marine reading, or the "N/A" sentinel when it could not be loaded
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Measurement {
    Value(f64),
    #[default]
    Unavailable,
}

impl Measurement {
    pub fn is_available(self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl From<Option<f64>> for Measurement {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Unavailable, Self::Value)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{}", v),
            Self::Unavailable => f.write_str("N/A"),
        }
    }
}

impl Serialize for Measurement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => serializer.serialize_f64(*v),
            Self::Unavailable => serializer.serialize_str("N/A"),
        }
    }
}

/// Coarse direction of water movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TideStatus {
    Rising,
    Falling,
    Slack,
    #[default]
    Unavailable,
}

impl TideStatus {
    /// Classify a signed current-speed sample in m/s.
    ///
    /// Strictly above 0.5 is rising, strictly below -0.5 is falling, anything
    /// else (including NaN) is slack.
    pub fn classify(current_speed: f64) -> Self {
        if current_speed > 0.5 {
            Self::Rising
        } else if current_speed < -0.5 {
            Self::Falling
        } else {
            Self::Slack
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rising => "Rising Tide",
            Self::Falling => "Falling Tide",
            Self::Slack => "Slack Tide",
            Self::Unavailable => "N/A",
        }
    }
}

/// Beach conditions derived from the latest hour of marine data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct BeachConditions {
    pub wave_height_m: Measurement,
    pub water_temp_c: Measurement,
    pub tide_status: TideStatus,
}

impl BeachConditions {
    /// Every field set to its sentinel
    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// Icon for a textual forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastIcon {
    Thunder,
    Rain,
    Showers,
    Cloudy,
    Fair,
    Sunny,
    Windy,
    /// Nothing in the description matched
    Cloud,
}

impl ForecastIcon {
    /// Keyword table, checked in order; the first hit wins.
    const KEYWORDS: [(&'static str, ForecastIcon); 7] = [
        ("thunder", ForecastIcon::Thunder),
        ("rain", ForecastIcon::Rain),
        ("showers", ForecastIcon::Showers),
        ("cloudy", ForecastIcon::Cloudy),
        ("fair", ForecastIcon::Fair),
        ("sunny", ForecastIcon::Sunny),
        ("windy", ForecastIcon::Windy),
    ];

    /// Pick an icon from a free-text forecast such as "Afternoon thunderstorms"
    pub fn from_description(description: &str) -> Self {
        let lowered = description.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(*keyword))
            .map_or(Self::Cloud, |(_, icon)| *icon)
    }

    /// Get icon name (Phosphor naming, resolved by the site stylesheet)
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Thunder => "cloud_lightning",
            Self::Rain => "cloud_rain",
            Self::Showers => "cloud_drizzle",
            Self::Cloudy => "cloud",
            Self::Fair => "cloud_sun",
            Self::Sunny => "sun",
            Self::Windy => "wind",
            Self::Cloud => "cloud",
        }
    }
}

/// One day of the four-day outlook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub description: String,
    pub temp_high_c: f64,
    pub temp_low_c: f64,
    /// e.g. "55 - 95%"
    pub humidity_range: String,
    /// e.g. "10 - 20 km/h"
    pub wind_speed_range: String,
    /// Compass point, e.g. "NNE"
    pub wind_direction: String,
}

impl ForecastDay {
    pub fn icon(&self) -> ForecastIcon {
        ForecastIcon::from_description(&self.description)
    }
}

/// Location service errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{service} returned HTTP {status}")]
    Status { service: &'static str, status: u16 },
    #[error("Parse error: {0}")]
    Parse(String),
}
