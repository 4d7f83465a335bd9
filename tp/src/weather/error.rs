//! Weather lookup error types

use thiserror::Error;

/// Errors that can occur while fetching a forecast
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Weather API Error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Error connecting to Weather API: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid weather response: {0}")]
    InvalidResponse(String),

    #[error("Weather configuration error: {0}")]
    Config(String),
}

impl WeatherError {
    /// Provider status code, when the provider answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            WeatherError::Api { status, .. } => Some(*status),
            WeatherError::Network(e) => e.status().map(|s| s.as_u16()),
            WeatherError::InvalidResponse(_) | WeatherError::Config(_) => None,
        }
    }

    /// True when the request never got a response
    pub fn is_network(&self) -> bool {
        matches!(self, WeatherError::Network(_))
    }
}
