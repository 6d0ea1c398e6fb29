//! View state and markup.
//!
//! Rendering is a pure function of the view state; the panel swaps the whole
//! container content each time.

use maud::{html, Markup};
use shoreline_core::AppError;
use shoreline_weather::{BeachConditions, ForecastDay, Measurement, WeatherSnapshot};

use crate::error::PanelError;

/// Element patched by the UV-index request
pub const UV_NODE_ID: &str = "uv-index";

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Content that can fill a panel once loaded
pub trait PanelContent {
    /// Text shown while loading
    const LOADING_TEXT: &'static str = "Loading weather data...";

    fn content(&self) -> Markup;
}

/// The three mutually exclusive panel states
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Loaded(T),
    Errored(ErrorView),
}

impl<T: PanelContent> ViewState<T> {
    pub fn markup(&self) -> Markup {
        match self {
            Self::Loading => html! {
                div class="weather-loading" {
                    p { (T::LOADING_TEXT) }
                }
            },
            Self::Loaded(content) => content.content(),
            Self::Errored(error) => error.content(),
        }
    }

    pub fn render(&self) -> String {
        self.markup().into_string()
    }
}

/// Generic message, raw error string and a retry control
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorView {
    pub message: String,
    pub detail: Option<String>,
}

impl From<PanelError> for ErrorView {
    fn from(err: PanelError) -> Self {
        let detail = err.to_string();
        let message = AppError::from(err).user_message().to_string();
        Self {
            message,
            detail: Some(detail),
        }
    }
}

impl ErrorView {
    fn content(&self) -> Markup {
        html! {
            div class="weather-error" {
                p { (self.message) }
                @if let Some(detail) = &self.detail {
                    p class="error-detail" { (detail) }
                }
                button class="retry-button" data-action="retry" { "Retry" }
            }
        }
    }
}

/// Current weather plus beach conditions
#[derive(Debug, Clone, PartialEq)]
pub struct BeachReport {
    pub weather: WeatherSnapshot,
    pub beach: BeachConditions,
}

/// Nearest whole number, halves rounded up, never "-0".
fn whole(value: f64) -> f64 {
    (value + 0.5).floor() + 0.0
}

fn with_unit(measurement: Measurement, unit: &str) -> String {
    if measurement.is_available() {
        format!("{}{}", measurement, unit)
    } else {
        measurement.to_string()
    }
}

impl PanelContent for BeachReport {
    fn content(&self) -> Markup {
        let w = &self.weather;
        let b = &self.beach;

        html! {
            div class="weather-current" {
                img class="weather-icon"
                    src={ (ICON_BASE_URL) "/" (w.icon_ref) "@2x.png" }
                    alt=(w.description);
                h3 class="weather-temp" { (whole(w.temperature_c)) "°C" }
                p class="weather-description" { (w.description) }
                ul class="weather-details" {
                    li { "Wind: " (whole(w.wind_speed_kmh)) " km/h" }
                    li { "Humidity: " (w.humidity_pct) "%" }
                    li { "UV Index: " span id=(UV_NODE_ID) { "--" } }
                }
            }
            div class="beach-conditions" {
                h4 { "Beach Conditions" }
                ul {
                    li { "Wave Height: " (with_unit(b.wave_height_m, " m")) }
                    li { "Water Temp: " (with_unit(b.water_temp_c, "°C")) }
                    li { "Tide: " (b.tide_status.label()) }
                }
            }
        }
    }
}

/// The four-day outlook
#[derive(Debug, Clone, PartialEq)]
pub struct Outlook(pub Vec<ForecastDay>);

impl PanelContent for Outlook {
    const LOADING_TEXT: &'static str = "Loading forecast...";

    fn content(&self) -> Markup {
        html! {
            div class="forecast" {
                @for day in &self.0 {
                    div class="forecast-day" {
                        h4 { (day.date.format("%a, %d %b").to_string()) }
                        span class={ "weather-icon icon-" (day.icon().icon_name()) } {}
                        p class="forecast-description" { (day.description) }
                        p class="forecast-temp" {
                            (whole(day.temp_high_c)) "°C / " (whole(day.temp_low_c)) "°C"
                        }
                        p { "Humidity: " (day.humidity_range) }
                        p { "Wind: " (day.wind_speed_range) " " (day.wind_direction) }
                    }
                }
            }
        }
    }
}
