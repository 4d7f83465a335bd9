//! TripPack - weather-aware trip planning assistant
//!
//! Takes a destination, date range and planned activities, fetches the
//! forecast for the stay and asks an LLM for a packing list, a daily routine
//! and sightseeing recommendations. A follow-up chat replays the whole
//! transcript plus a trip-context note on every question.
//!
//! # Modules
//!
//! - [`domain`] - Trip form validation and the forecast payload
//! - [`weather`] - Forecast provider trait and WeatherAPI.com client
//! - [`llm`] - LLM client trait with Anthropic and Bedrock implementations
//! - [`prompts`] - Handlebars prompt templates
//! - [`planner`] - Artifact generation with dependency short-circuiting
//! - [`session`] - Per-session state, transcript and handlers
//! - [`repl`] - Interactive terminal front end
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod planner;
pub mod prompts;
pub mod repl;
pub mod session;
pub mod weather;

// Re-export commonly used types
pub use config::{Config, LlmConfig, PlanConfig, TripConfig, WeatherConfig};
pub use domain::{Forecast, TripError, TripForm, TripInfo};
pub use llm::{
    AnthropicClient, BedrockClient, CompletionRequest, CompletionResponse, LlmClient, LlmError, Message, Role,
    create_client,
};
pub use planner::{Artifact, ArtifactKind, ContentGenerator, GenerationError, PlanOutcome};
pub use prompts::{PromptContext, PromptLoader};
pub use session::{Session, SessionError, SessionState, Transcript, TripAssistant};
pub use weather::{WeatherApiClient, WeatherError, WeatherProvider, forecast_days};
