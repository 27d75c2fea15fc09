use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Base URL for OpenWeather condition icons.
pub const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Parsed current conditions for one city.
///
/// Temperatures are rounded to whole Celsius at parse time, not at
/// render time, using round-half-away-from-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city_name: String,
    pub temperature_c: i32,
    /// Lowercase free text, e.g. "light rain".
    pub description: String,
    pub icon_code: String,
}

impl CurrentWeather {
    pub fn icon_url(&self) -> String {
        format!("{ICON_BASE_URL}/{}@2x.png", self.icon_code)
    }
}

/// One future time slot's predicted temperature and icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Hour-precision label in local time, e.g. "14:00".
    pub time_label: String,
    pub temperature_c: i32,
    pub icon_code: String,
}

impl ForecastEntry {
    pub fn icon_url(&self) -> String {
        format!("{ICON_BASE_URL}/{}.png", self.icon_code)
    }
}

/// Round a provider temperature to whole Celsius, half away from zero.
pub fn round_temp(celsius: f64) -> i32 {
    celsius.round() as i32
}

/// Hour-precision local-time label for an epoch-seconds timestamp.
pub fn hour_label(ts: i64) -> String {
    hour_label_in(ts, &Local)
}

fn hour_label_in<Tz: TimeZone>(ts: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|t| t.with_timezone(tz).format("%H:00").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}
