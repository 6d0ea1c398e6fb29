//! Four-day outlook panel.

use std::sync::Arc;

use shoreline_core::Config;
use shoreline_weather::{ForecastProvider, WeatherError};

use crate::error::PanelError;
use crate::generation::RenderGuard;
use crate::target::RenderTarget;
use crate::view::{ErrorView, Outlook, ViewState};

pub struct ForecastPanel<T: RenderTarget> {
    provider: Arc<ForecastProvider>,
    guard: Arc<RenderGuard<T>>,
}

impl<T: RenderTarget> Clone for ForecastPanel<T> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            guard: self.guard.clone(),
        }
    }
}

impl<T: RenderTarget> ForecastPanel<T> {
    pub fn new(provider: ForecastProvider, target: Arc<T>) -> Self {
        Self {
            provider: Arc::new(provider),
            guard: Arc::new(RenderGuard::new(target)),
        }
    }

    pub fn from_config(config: &Config, target: Arc<T>) -> Result<Self, WeatherError> {
        Ok(Self::new(ForecastProvider::new(&config.forecast)?, target))
    }

    pub async fn load(&self) {
        let ticket = self.guard.begin();
        self.guard
            .render(&ticket, &ViewState::<Outlook>::Loading.render());

        let result = tokio::select! {
            biased;
            _ = ticket.cancelled() => return,
            result = self.provider.fetch_outlook() => result,
        };

        let view = match result {
            Ok(days) => {
                tracing::info!("Forecast loaded: {} days", days.len());
                ViewState::Loaded(Outlook(days))
            }
            Err(e) => {
                tracing::error!("Failed to load forecast: {}", e);
                ViewState::Errored(ErrorView::from(PanelError::ForecastFetchFailed(e)))
            }
        };
        self.guard.render(&ticket, &view.render());
    }

    pub async fn retry(&self) {
        tracing::info!("Retrying forecast load");
        self.load().await;
    }
}
