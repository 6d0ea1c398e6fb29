use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Application configuration.
///
/// Built once at startup and shared read-only (behind an `Arc`) with every
/// provider and panel. Nothing mutates it after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Current weather and UV index (OpenWeather)
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Marine data (Stormglass)
    #[serde(default)]
    pub marine: MarineConfig,

    /// Four-day textual outlook (data.gov.sg)
    #[serde(default)]
    pub forecast: ForecastConfig,

    /// Where coordinates come from
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeather API key
    /// Create at: https://home.openweathermap.org/api_keys
    pub api_key: String,

    /// Base URL of the OpenWeather 2.5 API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: "YOUR_OPENWEATHER_API_KEY".to_string(),
            base_url: default_weather_base_url(),
        }
    }
}

impl WeatherConfig {
    /// Check if the API key is configured (not a placeholder)
    pub fn is_configured(&self) -> bool {
        is_real_key(&self.api_key)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarineConfig {
    /// Stormglass API key, sent as the Authorization header
    pub api_key: String,

    /// Base URL of the Stormglass v2 API
    #[serde(default = "default_marine_base_url")]
    pub base_url: String,
}

fn default_marine_base_url() -> String {
    "https://api.stormglass.io/v2".to_string()
}

impl Default for MarineConfig {
    fn default() -> Self {
        Self {
            api_key: "YOUR_STORMGLASS_API_KEY".to_string(),
            base_url: default_marine_base_url(),
        }
    }
}

impl MarineConfig {
    /// Check if the API key is configured (not a placeholder)
    pub fn is_configured(&self) -> bool {
        is_real_key(&self.api_key)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Render the four-day outlook panel
    #[serde(default = "default_forecast_enabled")]
    pub enabled: bool,

    /// Base URL of the data.gov.sg environment API (no key required)
    #[serde(default = "default_forecast_base_url")]
    pub base_url: String,
}

fn default_forecast_enabled() -> bool {
    true
}

fn default_forecast_base_url() -> String {
    "https://api.data.gov.sg/v1/environment".to_string()
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            enabled: default_forecast_enabled(),
            base_url: default_forecast_base_url(),
        }
    }
}

/// Location provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    /// Use the configured latitude/longitude
    #[default]
    Fixed,
    /// Look the position up from the machine's public IP
    Ip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default)]
    pub provider: LocationSource,

    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// IP geolocation endpoint returning `{latitude, longitude}`
    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,

    #[serde(default = "default_high_accuracy")]
    pub high_accuracy: bool,

    /// Give up on the position after this many milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Accept a cached position at most this old (0 = always fresh)
    #[serde(default)]
    pub maximum_age_ms: u64,
}

fn default_latitude() -> f64 {
    1.30
}

fn default_longitude() -> f64 {
    103.80
}

fn default_lookup_url() -> String {
    "https://ipapi.co/json/".to_string()
}

fn default_high_accuracy() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: LocationSource::default(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            lookup_url: default_lookup_url(),
            high_accuracy: default_high_accuracy(),
            timeout_ms: default_timeout_ms(),
            maximum_age_ms: 0,
        }
    }
}

fn is_real_key(key: &str) -> bool {
    !key.is_empty() && !key.starts_with("YOUR_")
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shoreline");

        Self {
            config_dir,
            weather: WeatherConfig::default(),
            marine: MarineConfig::default(),
            forecast: ForecastConfig::default(),
            location: LocationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, writing defaults there if missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(config_path)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);
        self.validate_url(&self.marine.base_url, "marine.base_url", &mut result);

        if self.forecast.enabled {
            self.validate_url(&self.forecast.base_url, "forecast.base_url", &mut result);
        }

        if !self.weather.is_configured() {
            result.add_warning(
                "weather.api_key",
                "OpenWeather API key not configured - the weather panel will show an error",
            );
        }

        if !self.marine.is_configured() {
            result.add_warning(
                "marine.api_key",
                "Stormglass API key not configured - beach conditions will show N/A",
            );
        }

        let location = &self.location;
        match location.provider {
            LocationSource::Fixed => {
                if !(-90.0..=90.0).contains(&location.latitude) {
                    result.add_error("location.latitude", "Latitude must be within -90..=90");
                }
                if !(-180.0..=180.0).contains(&location.longitude) {
                    result.add_error("location.longitude", "Longitude must be within -180..=180");
                }
            }
            LocationSource::Ip => {
                self.validate_url(&location.lookup_url, "location.lookup_url", &mut result);
            }
        }

        if location.timeout_ms == 0 {
            result.add_error("location.timeout_ms", "Location timeout must be greater than 0");
        } else if location.timeout_ms > 60_000 {
            result.add_warning("location.timeout_ms", "Location timeout is more than a minute");
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.port() == Some(0) {
                    result.add_error(field_name, "Port cannot be 0");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(config_path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("shoreline");

        Ok(config_dir.join("config.toml"))
    }
}
