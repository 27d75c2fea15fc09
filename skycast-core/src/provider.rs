use crate::{
    error::WeatherError,
    model::{CurrentWeather, ForecastEntry},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Number of forecast entries requested per lookup.
pub const FORECAST_COUNT: usize = 4;

/// Abstraction over the weather data source.
///
/// The two calls are issued sequentially per lookup: `forecast` only
/// after `current` succeeded. A `forecast` failure must never abort
/// the lookup; callers downgrade it to a display-only degraded state.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current(&self, city: &str) -> Result<CurrentWeather, WeatherError>;

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, WeatherError>;
}
