//! Per-lookup control flow: `Idle -> Loading -> {Displayed, Error}`.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use skycast_core::{Backdrop, Config, WeatherSource, resolve_city};
use tokio::task::JoinHandle;

use crate::view::ViewState;

/// How long an error banner stays up before reverting to idle.
pub const ERROR_RESET: Duration = Duration::from_secs(5);

pub struct App {
    view: Arc<Mutex<ViewState>>,
    backdrop: Backdrop,
    config: Config,
    config_path: Option<PathBuf>,
    source: Arc<dyn WeatherSource>,
    error_reset: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        source: Arc<dyn WeatherSource>,
    ) -> Self {
        Self {
            view: Arc::new(Mutex::new(ViewState::default())),
            backdrop: Backdrop::new(),
            config,
            config_path,
            source,
            error_reset: None,
        }
    }

    pub fn last_city(&self) -> Option<&str> {
        self.config.last_city()
    }

    /// Snapshot of the current view state.
    #[cfg(test)]
    fn view_state(&self) -> ViewState {
        self.view().clone()
    }

    fn view(&self) -> MutexGuard<'_, ViewState> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn render(&self) {
        println!("{}", self.view().render());
    }

    /// One full lookup. Blank input falls back to the default city.
    /// The city is persisted before the network call resolves; a
    /// forecast failure degrades the strip but never aborts the
    /// lookup, while a current-weather failure pre-empts everything
    /// and raises the auto-resetting error banner.
    pub async fn lookup(&mut self, input: &str) {
        let city = resolve_city(input).to_string();

        self.cancel_error_reset();
        self.config
            .remember_city(&city, self.config_path.as_deref());

        self.view().show_loading();
        self.render();

        let current = match self.source.current(&city).await {
            Ok(current) => current,
            Err(err) => {
                tracing::error!("Weather fetch failed for {city}: {err}");
                self.show_error(&err.to_string());
                return;
            }
        };

        self.view().show_current(&current);

        match self.source.forecast(&city).await {
            Ok(entries) => self.view().show_forecast(entries),
            Err(err) => {
                tracing::warn!("Forecast failed for {city}: {err}");
                self.view().show_forecast_unavailable();
            }
        }

        if let Some(asset) = self.backdrop.update(&current.description) {
            tracing::debug!("Switching backdrop to {asset}");
        }
        if let Some(asset) = self.backdrop.current() {
            self.view().set_backdrop(asset);
        }

        self.render();
    }

    fn show_error(&mut self, message: &str) {
        self.view().show_error(message);
        self.render();

        let view = Arc::clone(&self.view);
        self.error_reset = Some(tokio::spawn(async move {
            tokio::time::sleep(ERROR_RESET).await;

            let rendered = {
                let mut view = view.lock().unwrap_or_else(PoisonError::into_inner);
                view.reset_error();
                view.render()
            };
            println!("{rendered}");
        }));
    }

    /// A new lookup supersedes any pending banner reset.
    fn cancel_error_reset(&mut self) {
        if let Some(handle) = self.error_reset.take() {
            handle.abort();
        }
    }
}
