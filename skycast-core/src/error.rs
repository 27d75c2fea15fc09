use thiserror::Error;

/// Failures a weather lookup can produce.
///
/// Only the `Display` text ever reaches the user; callers decide
/// whether a failure aborts the lookup (current weather) or degrades
/// the display (forecast).
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connectivity is absent: the request never reached the provider.
    #[error("No internet connection")]
    Offline,

    /// Transport-level failure other than missing connectivity.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Non-success HTTP status; message taken from the provider's
    /// error body when one was present.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Transport succeeded but the body carries a provider-level
    /// failure (unknown city, bad credential, ...).
    #[error("{0}")]
    Provider(String),

    #[error("Malformed weather response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            WeatherError::Offline
        } else {
            WeatherError::Network(err)
        }
    }
}
