use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    config::DEFAULT_BASE_URL,
    error::{FetchError, TransportError},
    model::{Condition, WeatherReading, Wind},
};

use super::WeatherProvider;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

/// OpenWeatherMap current-conditions client. Temperatures come back in Kelvin
/// since no `units` parameter is sent.
#[derive(Debug)]
pub struct OpenWeatherProvider {
    api_key: SecretString,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key: SecretString::from(api_key),
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn current_url(&self) -> String {
        format!("{}{CURRENT_WEATHER_PATH}", self.base_url)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), fields(provider = "openweather"))]
    async fn request(&self, city: &str) -> Result<WeatherReading, FetchError> {
        let res = self
            .http
            .get(self.current_url())
            .query(&[("q", city), ("appid", self.api_key.expose_secret())])
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = res.status();
        debug!(%status, "OpenWeather responded");

        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()).into());
        }

        let body = res.text().await.map_err(TransportError::from)?;

        parse_current(&body)
    }
}

/// Decode and validate a current-weather body. All-or-nothing: any missing
/// or mistyped field rejects the whole payload.
pub fn parse_current(body: &str) -> Result<WeatherReading, FetchError> {
    let raw: serde_json::Value =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    let parsed: OwCurrentResponse =
        serde_json::from_value(raw).map_err(|e| FetchError::Schema(e.to_string()))?;

    WeatherReading::try_from(parsed)
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl TryFrom<OwCurrentResponse> for WeatherReading {
    type Error = FetchError;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let conditions = parsed
            .weather
            .into_iter()
            .map(|w| Condition::new(w.main, w.description, w.icon))
            .collect();

        WeatherReading::new(
            parsed.name,
            parsed.main.temp,
            parsed.main.feels_like,
            parsed.main.humidity,
            conditions,
            Wind::new(parsed.wind.speed, parsed.wind.deg),
        )
        .ok_or_else(|| FetchError::Schema("empty `name` or `weather` array".to_string()))
    }
}
