use async_trait::async_trait;
use std::fmt::Debug;
use tracing::debug;

use crate::{
    Config, SearchOutcome, WeatherReading,
    error::FetchError,
    provider::openweather::OpenWeatherProvider,
};

pub mod openweather;

/// Source of validated current-weather readings.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Perform the network round trip for an already trimmed, non-empty city.
    async fn request(&self, city: &str) -> Result<WeatherReading, FetchError>;

    /// Fetch current weather for `city`. Never fails: every error is folded
    /// into [`SearchOutcome::Failure`]. Blank input short-circuits before
    /// any request is made.
    async fn fetch_weather(&self, city: &str) -> SearchOutcome {
        let result = match city.trim() {
            "" => Err(FetchError::EmptyInput),
            city => self.request(city).await,
        };

        if let Err(err) = &result {
            debug!(kind = ?err.kind(), error = %err, "weather fetch failed");
        }

        SearchOutcome::from(result)
    }
}

/// Construct the OpenWeatherMap provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeatherMap API key configured.\n\
             Hint: run `weather configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let provider = OpenWeatherProvider::with_base_url(api_key, config.base_url());
    Ok(provider)
}
