//! Interactive REPL for TripPack
//!
//! Collects the trip form, runs the plan, then answers follow-up questions
//! about the trip with slash commands for history and session control.

pub mod render;
mod session;

pub use session::ReplSession;

use std::sync::Arc;

use eyre::{Context, Result};

use crate::config::Config;
use crate::llm::create_client;
use crate::planner::ContentGenerator;
use crate::prompts::PromptLoader;
use crate::session::{Session, TripAssistant};
use crate::weather::{WeatherApiClient, WeatherProvider};

/// Build the assistant and its clients from configuration
///
/// Validates the API keys first so a missing key fails before any prompt.
pub fn build_assistant(config: &Config) -> Result<TripAssistant> {
    config.validate()?;

    let llm = create_client(&config.llm).map_err(|e| eyre::eyre!("Failed to create LLM client: {}", e))?;
    let weather: Arc<dyn WeatherProvider> =
        Arc::new(WeatherApiClient::from_config(&config.weather).context("Failed to create weather client")?);

    let base = std::env::current_dir()?;
    let generator = ContentGenerator::new(llm.clone(), PromptLoader::new(base), config);

    Ok(TripAssistant::new(llm, weather, generator, config))
}

/// Run the interactive REPL
///
/// This is the main entry point for `tp chat`. When `session` is given (from
/// `tp plan --chat`) the form is skipped and the chat continues that session.
pub async fn run_interactive(assistant: TripAssistant, session: Option<Session>) -> Result<()> {
    let mut repl = match session {
        Some(session) => ReplSession::with_session(assistant, session),
        None => ReplSession::new(assistant),
    };
    repl.run().await
}
