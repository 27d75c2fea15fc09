//! View model for the weather card.
//!
//! All visible state lives in [`ViewState`]; the rest of the app
//! mutates it through the `show_*` operations and renders it with
//! [`ViewState::render`]. Nothing else touches the display.

use skycast_core::{CurrentWeather, ForecastEntry};

pub const IDLE_CITY: &str = "Weather App";
pub const IDLE_DESCRIPTION: &str = "Search for a city";
pub const IDLE_ICON: &str = "01d";
pub const TEMP_PLACEHOLDER: &str = "--°C";
pub const ERROR_CITY: &str = "Error";
pub const FORECAST_UNAVAILABLE: &str = "Hourly forecast unavailable";

/// The forecast strip below the current conditions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ForecastPane {
    #[default]
    Empty,
    Entries(Vec<ForecastEntry>),
    Unavailable,
}

#[derive(Debug, Clone)]
pub struct ViewState {
    pub temperature: String,
    pub city_name: String,
    pub description: String,
    pub icon_code: String,
    pub error: Option<String>,
    pub forecast: ForecastPane,
    pub backdrop: Option<&'static str>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            temperature: TEMP_PLACEHOLDER.to_string(),
            city_name: IDLE_CITY.to_string(),
            description: IDLE_DESCRIPTION.to_string(),
            icon_code: IDLE_ICON.to_string(),
            error: None,
            forecast: ForecastPane::Empty,
            backdrop: None,
        }
    }
}

impl ViewState {
    /// A new lookup fully replaces prior displayed state; the forecast
    /// strip is cleared before the fetch resolves.
    pub fn show_loading(&mut self) {
        self.temperature = "...".to_string();
        self.city_name = "Loading...".to_string();
        self.description.clear();
        self.error = None;
        self.forecast = ForecastPane::Empty;
    }

    pub fn show_current(&mut self, weather: &CurrentWeather) {
        self.temperature = format!("{}°C", weather.temperature_c);
        self.city_name = weather.city_name.clone();
        self.description = weather.description.clone();
        self.icon_code = weather.icon_code.clone();
        self.error = None;
    }

    pub fn show_forecast(&mut self, entries: Vec<ForecastEntry>) {
        self.forecast = ForecastPane::Entries(entries);
    }

    pub fn show_forecast_unavailable(&mut self) {
        self.forecast = ForecastPane::Unavailable;
    }

    pub fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.temperature = TEMP_PLACEHOLDER.to_string();
        self.city_name = ERROR_CITY.to_string();
        self.description.clear();
        self.icon_code = IDLE_ICON.to_string();
    }

    /// Revert the error banner to the idle placeholders.
    pub fn reset_error(&mut self) {
        self.city_name = IDLE_CITY.to_string();
        self.description = IDLE_DESCRIPTION.to_string();
        self.error = None;
    }

    pub fn set_backdrop(&mut self, asset: &'static str) {
        self.backdrop = Some(asset);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "  {}  {}  [{}]\n",
            self.city_name, self.temperature, self.icon_code
        ));
        if !self.description.is_empty() {
            out.push_str(&format!("  {}\n", self.description));
        }

        match &self.forecast {
            ForecastPane::Empty => {}
            ForecastPane::Unavailable => {
                out.push_str(&format!("  {FORECAST_UNAVAILABLE}\n"));
            }
            ForecastPane::Entries(entries) => {
                let strip = entries
                    .iter()
                    .map(|e| format!("{} {}°C [{}]", e.time_label, e.temperature_c, e.icon_code))
                    .collect::<Vec<_>>()
                    .join("  |  ");
                out.push_str(&format!("  {strip}\n"));
            }
        }

        if let Some(message) = &self.error {
            out.push_str(&format!("  ! {message}\n"));
        }
        if let Some(asset) = self.backdrop {
            out.push_str(&format!("  backdrop: {asset}\n"));
        }

        out
    }
}
