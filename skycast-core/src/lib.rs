//! Core library for the `skycast` weather app.
//!
//! This crate defines:
//! - Configuration & the last-city preference
//! - The OpenWeather client and the source abstraction over it
//! - Shared domain models and the error taxonomy
//! - Background asset selection from condition keywords
//!
//! It is used by `skycast-cli`, but can also be reused by other frontends.

pub mod backdrop;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use backdrop::{Backdrop, select_asset};
pub use config::{Config, DEFAULT_CITY, resolve_city};
pub use error::WeatherError;
pub use model::{CurrentWeather, ForecastEntry};
pub use provider::{FORECAST_COUNT, WeatherSource, openweather::OpenWeather};
