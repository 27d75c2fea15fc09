use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::WeatherError,
    model::{CurrentWeather, ForecastEntry, hour_label, round_temp},
    provider::FORECAST_COUNT,
};

use super::WeatherSource;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const FALLBACK_ICON: &str = "01d";

#[derive(Debug, Clone)]
pub struct OpenWeather {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeather {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different endpoint (used by tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    /// GET a metric-units endpoint, returning the status and raw body.
    async fn get(
        &self,
        endpoint: &str,
        city: &str,
        extra: &[(&str, &str)],
    ) -> Result<(reqwest::StatusCode, String), WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut query = vec![
            ("q", city),
            ("appid", self.api_key.as_str()),
            ("units", "metric"),
        ];
        query.extend_from_slice(extra);

        let res = self.http.get(&url).query(&query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        Ok((status, body))
    }
}

/// Error discriminator embedded in an otherwise-successful response.
/// `cod` is an integer on the current endpoint and a string on the
/// forecast endpoint.
#[derive(Debug, Deserialize)]
struct OwStatus {
    cod: Option<Value>,
    // String on error bodies, a number on forecast success bodies.
    message: Option<Value>,
}

impl OwStatus {
    fn is_ok(&self) -> bool {
        match &self.cod {
            None => true,
            Some(Value::Number(n)) => n.as_i64() == Some(200),
            Some(Value::String(s)) => s == "200",
            Some(_) => false,
        }
    }

    fn message_text(&self) -> Option<String> {
        self.message
            .as_ref()
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    }
}

/// Extract the provider's `message` field from an error body, if any.
fn body_message(body: &str) -> Option<String> {
    serde_json::from_str::<OwStatus>(body)
        .ok()
        .and_then(|status| status.message_text())
}

fn check_provider_status(body: &str, fallback_message: &str) -> Result<(), WeatherError> {
    let status: OwStatus = serde_json::from_str(body)?;

    if status.is_ok() {
        return Ok(());
    }

    Err(WeatherError::Provider(
        status
            .message_text()
            .unwrap_or_else(|| fallback_message.to_string()),
    ))
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastItem {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastItem>,
}

#[async_trait]
impl WeatherSource for OpenWeather {
    async fn current(&self, city: &str) -> Result<CurrentWeather, WeatherError> {
        let (status, body) = self.get("weather", city, &[]).await?;

        if !status.is_success() {
            return Err(WeatherError::Http {
                status: status.as_u16(),
                message: body_message(&body)
                    .unwrap_or_else(|| "Failed to fetch weather data".to_string()),
            });
        }

        check_provider_status(&body, "City not found")?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        let (description, icon_code) = parsed
            .weather
            .first()
            .map(|w| (w.description.to_lowercase(), w.icon.clone()))
            .unwrap_or_else(|| ("unknown".to_string(), FALLBACK_ICON.to_string()));

        Ok(CurrentWeather {
            city_name: parsed.name,
            temperature_c: round_temp(parsed.main.temp),
            description,
            icon_code,
        })
    }

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, WeatherError> {
        let cnt = FORECAST_COUNT.to_string();
        let (status, body) = self.get("forecast", city, &[("cnt", cnt.as_str())]).await?;

        // Forecast transport failures surface a fixed message; the
        // error body is not consulted.
        if !status.is_success() {
            return Err(WeatherError::Http {
                status: status.as_u16(),
                message: "Forecast not available".to_string(),
            });
        }

        check_provider_status(&body, "Forecast error")?;

        let parsed: OwForecastResponse = serde_json::from_str(&body)?;

        let entries = parsed
            .list
            .into_iter()
            .take(FORECAST_COUNT)
            .map(|item| {
                let icon_code = item
                    .weather
                    .first()
                    .map(|w| w.icon.clone())
                    .unwrap_or_else(|| FALLBACK_ICON.to_string());

                ForecastEntry {
                    time_label: hour_label(item.dt),
                    temperature_c: round_temp(item.main.temp),
                    icon_code,
                }
            })
            .collect();

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> OpenWeather {
        OpenWeather::with_base_url("TESTKEY".to_string(), server.uri())
    }

    fn current_body(temp: f64) -> serde_json::Value {
        serde_json::json!({
            "cod": 200,
            "name": "Mumbai",
            "main": { "temp": temp, "humidity": 83 },
            "weather": [{ "description": "light rain", "icon": "10d" }]
        })
    }

    #[tokio::test]
    async fn current_parses_and_rounds_at_parse_time() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Mumbai"))
            .and(query_param("appid", "TESTKEY"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body(23.6)))
            .mount(&server)
            .await;

        let result = client(&server).current("Mumbai").await.expect("current");

        assert_eq!(result.city_name, "Mumbai");
        assert_eq!(result.temperature_c, 24);
        assert_eq!(result.description, "light rain");
        assert_eq!(result.icon_code, "10d");
    }

    #[tokio::test]
    async fn current_http_error_uses_provider_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404",
                "message": "city not found"
            })))
            .mount(&server)
            .await;

        let err = client(&server).current("Nowhere").await.unwrap_err();

        match err {
            WeatherError::Http { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "city not found");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn current_http_error_without_body_uses_fallback_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = client(&server).current("Mumbai").await.unwrap_err();

        match err {
            WeatherError::Http { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Failed to fetch weather data");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn embedded_error_code_in_success_body_is_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cod": 401,
                "message": "Invalid API key"
            })))
            .mount(&server)
            .await;

        let err = client(&server).current("Mumbai").await.unwrap_err();

        match err {
            WeatherError::Provider(message) => assert_eq!(message, "Invalid API key"),
            other => panic!("expected Provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn forecast_requests_four_entries_and_parses_them() {
        let server = MockServer::start().await;

        let list: Vec<serde_json::Value> = (0..4)
            .map(|i| {
                serde_json::json!({
                    "dt": 1_672_531_200 + i * 3600,
                    "main": { "temp": 20.4 + i as f64 },
                    "weather": [{ "description": "few clouds", "icon": "02d" }]
                })
            })
            .collect();

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("cnt", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cod": "200",
                "list": list
            })))
            .mount(&server)
            .await;

        let entries = client(&server).forecast("Mumbai").await.expect("forecast");

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].temperature_c, 20);
        assert_eq!(entries[3].temperature_c, 23);
        assert!(entries.iter().all(|e| e.icon_code == "02d"));
        assert!(entries.iter().all(|e| e.time_label.ends_with(":00")));
    }

    #[tokio::test]
    async fn forecast_http_error_has_forecast_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client(&server).forecast("Mumbai").await.unwrap_err();

        match err {
            WeatherError::Http { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Forecast not available");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn forecast_http_error_ignores_body_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404",
                "message": "city not found"
            })))
            .mount(&server)
            .await;

        let err = client(&server).forecast("Nowhere").await.unwrap_err();

        match err {
            WeatherError::Http { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Forecast not available");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_offline() {
        // Nothing listens on port 1, so the connection is refused.
        let client =
            OpenWeather::with_base_url("TESTKEY".to_string(), "http://127.0.0.1:1".to_string());

        let err = client.current("Mumbai").await.unwrap_err();

        assert!(matches!(err, WeatherError::Offline), "got {err:?}");
        assert_eq!(err.to_string(), "No internet connection");
    }

    #[tokio::test]
    async fn forecast_string_cod_error_is_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cod": "404",
                "message": "city not found"
            })))
            .mount(&server)
            .await;

        let err = client(&server).forecast("Nowhere").await.unwrap_err();

        match err {
            WeatherError::Provider(message) => assert_eq!(message, "city not found"),
            other => panic!("expected Provider error, got {other:?}"),
        }
    }
}
