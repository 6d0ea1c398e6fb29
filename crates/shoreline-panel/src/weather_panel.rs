//! Current weather and beach conditions panel.

use std::sync::Arc;

use parking_lot::Mutex;
use shoreline_core::Config;
use shoreline_weather::{
    locate, Coordinates, GeolocationOptions, LocationProvider, MarineProvider, WeatherError,
    WeatherProvider,
};
use tokio::task::JoinHandle;

use crate::error::PanelError;
use crate::generation::{RenderGuard, Ticket};
use crate::target::RenderTarget;
use crate::view::{BeachReport, ErrorView, ViewState, UV_NODE_ID};

/// Fetches location, weather and marine data and renders them into one target.
///
/// Cloning is cheap; clones share the target and the request generation, so
/// a `retry()` on any clone supersedes a `load()` in flight on another.
pub struct WeatherPanel<L: LocationProvider, T: RenderTarget> {
    location: Arc<L>,
    weather: Arc<WeatherProvider>,
    marine: Arc<MarineProvider>,
    options: GeolocationOptions,
    guard: Arc<RenderGuard<T>>,
    uv_task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl<L: LocationProvider, T: RenderTarget> Clone for WeatherPanel<L, T> {
    fn clone(&self) -> Self {
        Self {
            location: self.location.clone(),
            weather: self.weather.clone(),
            marine: self.marine.clone(),
            options: self.options,
            guard: self.guard.clone(),
            uv_task: self.uv_task.clone(),
        }
    }
}

impl<L: LocationProvider, T: RenderTarget> WeatherPanel<L, T> {
    pub fn new(
        location: L,
        weather: WeatherProvider,
        marine: MarineProvider,
        options: GeolocationOptions,
        target: Arc<T>,
    ) -> Self {
        Self {
            location: Arc::new(location),
            weather: Arc::new(weather),
            marine: Arc::new(marine),
            options,
            guard: Arc::new(RenderGuard::new(target)),
            uv_task: Arc::new(Mutex::new(None)),
        }
    }

    /// Build the providers from `config`.
    pub fn from_config(config: &Config, location: L, target: Arc<T>) -> Result<Self, WeatherError> {
        Ok(Self::new(
            location,
            WeatherProvider::new(&config.weather)?,
            MarineProvider::new(&config.marine)?,
            GeolocationOptions::from(&config.location),
            target,
        ))
    }

    /// Render loading, fetch everything, then render the result or the error view.
    ///
    /// Starting a load supersedes any load still in flight; only the newest
    /// one ever reaches the target.
    pub async fn load(&self) {
        let ticket = self.guard.begin();
        let generation = ticket.generation();
        tracing::debug!(generation, "Loading weather panel");

        self.guard
            .render(&ticket, &ViewState::<BeachReport>::Loading.render());

        let outcome = tokio::select! {
            biased;
            _ = ticket.cancelled() => {
                tracing::debug!(generation, "Weather load superseded");
                return;
            }
            outcome = self.fetch() => outcome,
        };

        match outcome {
            Ok((report, coords)) => {
                tracing::info!(generation, "Weather panel loaded");
                if self.guard.render(&ticket, &ViewState::Loaded(report).render()) {
                    self.spawn_uv_index(ticket, coords);
                }
            }
            Err(e) => {
                tracing::error!(generation, "Failed to load weather panel: {}", e);
                let view = ViewState::<BeachReport>::Errored(ErrorView::from(e));
                self.guard.render(&ticket, &view.render());
            }
        }
    }

    /// User-triggered reload. No backoff and no attempt limit.
    pub async fn retry(&self) {
        tracing::info!("Retrying weather panel load");
        self.load().await;
    }

    /// Wait for the latest UV-index request, if one is outstanding.
    pub async fn settle(&self) {
        let handle = self.uv_task.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::warn!("UV index task failed: {}", e);
            }
        }
    }

    async fn fetch(&self) -> Result<(BeachReport, Coordinates), PanelError> {
        let coords = locate(self.location.as_ref(), &self.options).await?;
        tracing::info!("Got location: {}, {}", coords.latitude, coords.longitude);

        let (weather, beach) = tokio::join!(
            self.weather.fetch_current(&coords),
            self.marine.fetch_conditions(&coords),
        );
        let weather = weather.map_err(PanelError::WeatherFetchFailed)?;

        Ok((BeachReport { weather, beach }, coords))
    }

    /// Fire-and-forget: patches the UV node on success, logs on failure.
    fn spawn_uv_index(&self, ticket: Ticket, coords: Coordinates) {
        let weather = self.weather.clone();
        let guard = self.guard.clone();

        let handle = tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                _ = ticket.cancelled() => return,
                result = weather.fetch_uv_index(&coords) => result,
            };

            match result {
                Ok(uv) => {
                    if !guard.patch(&ticket, UV_NODE_ID, &format!("{:.1}", uv)) {
                        tracing::debug!("UV node gone or load superseded; skipping patch");
                    }
                }
                Err(e) => tracing::warn!("UV index unavailable: {}", e),
            }
        });

        *self.uv_task.lock() = Some(handle);
    }
}
