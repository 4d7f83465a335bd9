//! WeatherProvider trait and the WeatherAPI.com client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::WeatherError;
use crate::config::WeatherConfig;
use crate::domain::Forecast;

/// Source of multi-day forecasts
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch a forecast for the next `days` days at `location`
    ///
    /// Single attempt. Any non-200 answer is an error.
    async fn forecast(&self, location: &str, days: u32) -> Result<Forecast, WeatherError>;
}

/// WeatherAPI.com `forecast.json` client
pub struct WeatherApiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiClient {
    /// Create a new client from configuration
    ///
    /// Reads the API key from the environment variable named in config.
    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        debug!(base_url = %config.base_url, "WeatherApiClient::from_config: called");
        let api_key = config
            .get_api_key()
            .map_err(|e| WeatherError::Config(e.to_string()))?;
        Self::new(&config.base_url, api_key, Duration::from_millis(config.timeout_ms))
    }

    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    async fn forecast(&self, location: &str, days: u32) -> Result<Forecast, WeatherError> {
        debug!(%location, days, "WeatherApiClient::forecast: called");
        let url = format!("{}/forecast.json", self.base_url);
        let days = days.to_string();

        let response = self
            .http
            .get(url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", location),
                ("days", days.as_str()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            debug!(status, "WeatherApiClient::forecast: API error");
            return Err(WeatherError::Api { status, body });
        }

        let text = response.text().await?;
        let body: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;
        let forecast = Forecast::new(body);
        info!(%location, days = ?forecast.day_count(), "Weather forecast fetched");
        Ok(forecast)
    }
}
