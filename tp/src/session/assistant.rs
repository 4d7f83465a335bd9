//! Trip submission and follow-up chat handlers

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::{Session, SessionState};
use crate::config::{Config, TripConfig};
use crate::domain::{TripError, TripForm};
use crate::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError};
use crate::planner::{ArtifactKind, ContentGenerator, PlanOutcome};
use crate::weather::{WeatherError, WeatherProvider, forecast_days};

/// Errors surfaced to the user by session handlers
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Trip(#[from] TripError),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error("An error occurred: {0}")]
    Llm(#[from] LlmError),

    #[error("A trip has already been submitted for this session; start a new session to plan another")]
    TripAlreadySubmitted,

    #[error("Question is empty")]
    EmptyQuestion,
}

/// Runs the plan and chat flows against a session
pub struct TripAssistant {
    llm: Arc<dyn LlmClient>,
    weather: Arc<dyn WeatherProvider>,
    generator: ContentGenerator,
    trip_rules: TripConfig,
    forecast_horizon: Option<u32>,
}

impl TripAssistant {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        weather: Arc<dyn WeatherProvider>,
        generator: ContentGenerator,
        config: &Config,
    ) -> Self {
        debug!(
            max_stay_days = ?config.trip.max_stay_days,
            forecast_horizon = ?config.weather.max_forecast_days,
            "TripAssistant::new: called"
        );
        Self {
            llm,
            weather,
            generator,
            trip_rules: config.trip.clone(),
            forecast_horizon: config.weather.max_forecast_days,
        }
    }

    /// Artifact kinds a submission will generate, in order
    pub fn planned_artifacts(&self) -> &[ArtifactKind] {
        self.generator.artifacts()
    }

    /// Validate the form, fetch the forecast and generate the artifacts
    ///
    /// Validation and weather failures leave the session untouched. Once the
    /// forecast is in, the trip is fixed on the session; artifacts that were
    /// generated are appended to the transcript.
    pub async fn submit_trip(&self, session: &mut Session, form: &TripForm) -> Result<PlanOutcome, SessionError> {
        debug!(session = %session.id, "TripAssistant::submit_trip: called");
        if session.trip.is_some() {
            debug!("TripAssistant::submit_trip: trip already set");
            return Err(SessionError::TripAlreadySubmitted);
        }

        let trip = form.validate(&self.trip_rules)?;
        let days = forecast_days(trip.stay_days(), self.forecast_horizon);
        info!(destination = %trip.destination(), stay_days = trip.stay_days(), days, "Fetching weather data");

        let forecast = self.weather.forecast(trip.destination(), days).await.inspect_err(|e| {
            warn!(error = %e, "Weather lookup failed, aborting plan");
        })?;

        session.state.advance(SessionState::TripReady);
        let outcome = self.generator.generate(&trip, &forecast).await;
        session.trip = Some(trip);

        for artifact in &outcome.artifacts {
            session
                .transcript
                .push_assistant(artifact.kind.transcript_entry(&artifact.text));
        }
        if !outcome.is_empty() {
            session.state.advance(SessionState::ChatActive);
        }

        info!(
            generated = outcome.artifacts.len(),
            failed = outcome.failures.len(),
            skipped = outcome.skipped.len(),
            "Plan finished"
        );
        Ok(outcome)
    }

    /// Ask a follow-up question
    ///
    /// The question is appended before the request and stays in the transcript
    /// even if the request fails, so the next turn resends it. The reply is
    /// returned whole so callers can tell a truncated answer apart.
    pub async fn ask(&self, session: &mut Session, question: &str) -> Result<CompletionResponse, SessionError> {
        debug!(session = %session.id, "TripAssistant::ask: called");
        let question = question.trim();
        if question.is_empty() {
            return Err(SessionError::EmptyQuestion);
        }

        session.transcript.push_user(question);
        let request = self.chat_request(session);
        debug!(turns = request.messages.len(), has_context = request.system_prompt.is_some(), "TripAssistant::ask: sending");

        let response = self.llm.complete(request).await.inspect_err(|e| {
            warn!(error = %e, "Follow-up failed, question kept in transcript");
        })?;

        debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            total_tokens = response.usage.total(),
            "TripAssistant::ask: usage"
        );
        if response.is_truncated() {
            warn!("Follow-up reply truncated at max tokens");
        }

        session.transcript.push_assistant(response.content.clone());
        session.state.advance(SessionState::ChatActive);
        Ok(response)
    }

    /// Whole transcript plus the trip-context note, if a trip exists
    fn chat_request(&self, session: &Session) -> CompletionRequest {
        let (max_tokens, temperature) = self.generator.decoding();
        CompletionRequest {
            system_prompt: session.trip().map(|t| t.context_note()),
            messages: session.transcript.messages().to_vec(),
            max_tokens,
            temperature,
        }
    }
}
