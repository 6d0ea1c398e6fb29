//! Weather panels for the Shoreline site.
//!
//! Each panel owns one render target and always shows exactly one of the
//! loading, loaded or errored views.

mod error_mapping;

pub mod error;
pub mod forecast_panel;
pub mod generation;
pub mod target;
pub mod view;
pub mod weather_panel;

pub use error::PanelError;
pub use forecast_panel::ForecastPanel;
pub use generation::{RenderGuard, Ticket};
pub use target::{MemoryTarget, RenderTarget};
pub use view::{BeachReport, ErrorView, Outlook, PanelContent, ViewState, UV_NODE_ID};
pub use weather_panel::WeatherPanel;
