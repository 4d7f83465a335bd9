//! TripPack configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::planner::ArtifactKind;

/// Main TripPack configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Weather provider configuration
    pub weather: WeatherConfig,

    /// Trip form rules
    pub trip: TripConfig,

    /// Which artifacts a plan produces
    pub plan: PlanConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that the API key environment variables are set. Call this before
    /// building any client so a missing key fails fast with a clear message.
    pub fn validate(&self) -> Result<()> {
        if std::env::var(&self.llm.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.llm.api_key_env
            ));
        }
        self.validate_weather()
    }

    /// Check only the weather key, for commands that never call the LLM
    pub fn validate_weather(&self) -> Result<()> {
        if std::env::var(&self.weather.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "Weather API key not found. Set the {} environment variable.",
                self.weather.api_key_env
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .trippack.yml
        let local_config = PathBuf::from(".trippack.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/trippack/trippack.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("trippack").join("trippack.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is set up
    ///
    /// Errors are swallowed; the full load later reports them properly.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        Self::load(config_path).ok().and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name ("anthropic" or "bedrock")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL; derived from the provider when unset
    #[serde(rename = "base-url", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// AWS region for bedrock; falls back to AWS_REGION
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".to_string(),
            model: "claude-3-5-haiku-20241022".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            base_url: None,
            region: None,
            max_tokens: 1024,
            temperature: 0.7,
            timeout_ms: 120_000,
        }
    }
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .map_err(|_| eyre::eyre!("Environment variable {} is not set", self.api_key_env))
    }

    /// Resolve the AWS region from config, then the AWS_REGION environment variable
    pub fn resolved_region(&self) -> Option<String> {
        self.region.clone().or_else(|| std::env::var("AWS_REGION").ok())
    }
}

/// Weather provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Forecast API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Provider forecast horizon; null leaves the day count unclamped
    #[serde(rename = "max-forecast-days")]
    pub max_forecast_days: Option<u32>,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.weatherapi.com/v1".to_string(),
            api_key_env: "WEATHER_API_KEY".to_string(),
            max_forecast_days: Some(14),
            timeout_ms: 50_000,
        }
    }
}

impl WeatherConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .map_err(|_| eyre::eyre!("Environment variable {} is not set", self.api_key_env))
    }
}

/// Trip form rules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TripConfig {
    /// Reject stays longer than this many days
    #[serde(rename = "max-stay-days", skip_serializing_if = "Option::is_none")]
    pub max_stay_days: Option<u32>,
}

/// Plan generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Artifacts to generate; the packing list always runs first
    pub artifacts: Vec<ArtifactKind>,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            artifacts: ArtifactKind::ALL.to_vec(),
        }
    }
}
