//! Content generator: one LLM call per artifact

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::{Artifact, ArtifactKind};
use crate::config::{Config, LlmConfig};
use crate::domain::{Forecast, TripInfo};
use crate::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError};
use crate::prompts::{PromptContext, PromptLoader};

/// Why an artifact could not be produced
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Error building {kind} prompt: {message}")]
    Prompt { kind: ArtifactKind, message: String },

    #[error("Error generating {kind}: {source}")]
    Llm {
        kind: ArtifactKind,
        #[source]
        source: LlmError,
    },
}

impl GenerationError {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            GenerationError::Prompt { kind, .. } | GenerationError::Llm { kind, .. } => *kind,
        }
    }
}

/// Everything one plan submission produced
#[derive(Debug, Default)]
pub struct PlanOutcome {
    /// Artifacts generated, in generation order
    pub artifacts: Vec<Artifact>,
    /// Artifacts whose generation failed
    pub failures: Vec<GenerationError>,
    /// Artifacts not attempted because a dependency failed
    pub skipped: Vec<ArtifactKind>,
}

impl PlanOutcome {
    pub fn get(&self, kind: ArtifactKind) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Kinds whose text was cut off at the token limit
    pub fn truncated(&self) -> Vec<ArtifactKind> {
        self.artifacts.iter().filter(|a| a.truncated).map(|a| a.kind).collect()
    }
}

/// Turns a trip and its forecast into free-text artifacts
pub struct ContentGenerator {
    llm: Arc<dyn LlmClient>,
    prompts: PromptLoader,
    artifacts: Vec<ArtifactKind>,
    max_tokens: u32,
    temperature: f32,
}

impl ContentGenerator {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PromptLoader, config: &Config) -> Self {
        Self::with_artifacts(llm, prompts, &config.llm, &config.plan.artifacts)
    }

    pub fn with_artifacts(
        llm: Arc<dyn LlmClient>,
        prompts: PromptLoader,
        llm_config: &LlmConfig,
        requested: &[ArtifactKind],
    ) -> Self {
        let artifacts = generation_order(requested);
        debug!(?artifacts, "ContentGenerator::with_artifacts: called");
        Self {
            llm,
            prompts,
            artifacts,
            max_tokens: llm_config.max_tokens,
            temperature: llm_config.temperature,
        }
    }

    /// Decoding parameters shared with follow-up chat
    pub fn decoding(&self) -> (u32, f32) {
        (self.max_tokens, self.temperature)
    }

    /// Kinds in the order they will be generated
    pub fn artifacts(&self) -> &[ArtifactKind] {
        &self.artifacts
    }

    /// Generate every configured artifact for the trip
    ///
    /// Runs sequentially. A kind whose dependency did not succeed is skipped
    /// without a request.
    pub async fn generate(&self, trip: &TripInfo, forecast: &Forecast) -> PlanOutcome {
        debug!(destination = %trip.destination(), "ContentGenerator::generate: called");
        let context = PromptContext::new(trip, forecast);
        let mut outcome = PlanOutcome::default();

        for &kind in &self.artifacts {
            if let Some(dep) = kind.depends_on()
                && outcome.get(dep).is_none()
            {
                debug!(%kind, %dep, "ContentGenerator::generate: dependency missing, skipping");
                outcome.skipped.push(kind);
                continue;
            }

            match self.generate_one(kind, &context).await {
                Ok(response) => {
                    let truncated = response.is_truncated();
                    if truncated {
                        warn!(%kind, max_tokens = self.max_tokens, "Artifact truncated at max tokens");
                    }
                    info!(%kind, chars = response.content.len(), "Artifact generated");
                    outcome.artifacts.push(Artifact {
                        kind,
                        text: response.content,
                        truncated,
                    });
                }
                Err(e) => {
                    warn!(%kind, error = %e, "Artifact generation failed");
                    outcome.failures.push(e);
                }
            }
        }

        outcome
    }

    async fn generate_one(
        &self,
        kind: ArtifactKind,
        context: &PromptContext,
    ) -> Result<CompletionResponse, GenerationError> {
        let prompt = self
            .prompts
            .render(kind.template_name(), context)
            .map_err(|e| GenerationError::Prompt {
                kind,
                message: e.to_string(),
            })?;

        let request = CompletionRequest::single(prompt, self.max_tokens, self.temperature);
        let response = self
            .llm
            .complete(request)
            .await
            .map_err(|source| GenerationError::Llm { kind, source })?;
        debug!(
            %kind,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            total_tokens = response.usage.total(),
            "ContentGenerator::generate_one: usage"
        );
        Ok(response)
    }
}

/// Packing list first, then the requested kinds once each
fn generation_order(requested: &[ArtifactKind]) -> Vec<ArtifactKind> {
    let mut order = vec![ArtifactKind::PackingList];
    for kind in requested {
        if !order.contains(kind) {
            order.push(*kind);
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TripConfig;
    use crate::domain::TripForm;
    use crate::llm::client::mock::MockLlmClient;
    use serde_json::json;

    fn trip() -> TripInfo {
        TripForm::new("Kyoto, Japan", "2024-04-01", "2024-04-03", "temples\ntea ceremony")
            .validate(&TripConfig::default())
            .unwrap()
    }

    fn forecast() -> Forecast {
        Forecast::new(json!({"forecast": {"forecastday": [{}, {}, {}]}}))
    }

    fn generator(llm: Arc<MockLlmClient>, kinds: &[ArtifactKind]) -> ContentGenerator {
        ContentGenerator::with_artifacts(llm, PromptLoader::embedded_only(), &LlmConfig::default(), kinds)
    }

    #[test]
    fn test_generation_order() {
        assert_eq!(generation_order(&[]), vec![ArtifactKind::PackingList]);
        assert_eq!(
            generation_order(&[ArtifactKind::RecommendedSpots, ArtifactKind::PackingList]),
            vec![ArtifactKind::PackingList, ArtifactKind::RecommendedSpots]
        );
        assert_eq!(generation_order(&ArtifactKind::ALL), ArtifactKind::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_generates_all_artifacts_in_order() {
        let llm = Arc::new(MockLlmClient::ok(&["pack", "routine", "spots"]));
        let outcome = generator(llm.clone(), &ArtifactKind::ALL).generate(&trip(), &forecast()).await;

        assert_eq!(outcome.artifacts.len(), 3);
        assert_eq!(outcome.get(ArtifactKind::PackingList).unwrap().text, "pack");
        assert_eq!(outcome.get(ArtifactKind::DailyRoutine).unwrap().text, "routine");
        assert_eq!(outcome.get(ArtifactKind::RecommendedSpots).unwrap().text, "spots");
        assert!(outcome.failures.is_empty());
        assert!(outcome.skipped.is_empty());
        assert_eq!(llm.call_count(), 3);
    }

    #[tokio::test]
    async fn test_requests_are_single_turn_with_fixed_decoding() {
        let llm = Arc::new(MockLlmClient::ok(&["pack", "routine", "spots"]));
        generator(llm.clone(), &ArtifactKind::ALL).generate(&trip(), &forecast()).await;

        for request in llm.requests() {
            assert_eq!(request.messages.len(), 1);
            assert!(request.system_prompt.is_none());
            assert_eq!(request.max_tokens, 1024);
            assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        }
        let first = &llm.requests()[0].messages[0].content;
        assert!(first.contains("packing list"));
        assert!(first.contains(r#""temples\ntea ceremony""#));
        assert!(first.contains("Stay Period: 3 days"));
    }

    #[tokio::test]
    async fn test_packing_list_failure_skips_dependents() {
        let llm = Arc::new(MockLlmClient::new(vec![Err((500, "overloaded".to_string()))]));
        let outcome = generator(llm.clone(), &ArtifactKind::ALL).generate(&trip(), &forecast()).await;

        assert!(outcome.is_empty());
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].kind(), ArtifactKind::PackingList);
        assert_eq!(
            outcome.skipped,
            vec![ArtifactKind::DailyRoutine, ArtifactKind::RecommendedSpots]
        );
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_routine_failure_does_not_block_spots() {
        let llm = Arc::new(MockLlmClient::new(vec![
            Ok("pack".to_string()),
            Err((400, "bad request".to_string())),
            Ok("spots".to_string()),
        ]));
        let outcome = generator(llm.clone(), &ArtifactKind::ALL).generate(&trip(), &forecast()).await;

        assert_eq!(outcome.artifacts.len(), 2);
        assert_eq!(outcome.failures[0].kind(), ArtifactKind::DailyRoutine);
        assert!(outcome.failures[0].to_string().contains("bad request"));
        assert!(outcome.get(ArtifactKind::RecommendedSpots).is_some());
    }

    #[tokio::test]
    async fn test_truncated_artifact_is_flagged() {
        let llm = Arc::new(MockLlmClient::ok(&["pack", "routine", "spots"]).truncating(&[1]));
        let outcome = generator(llm, &ArtifactKind::ALL).generate(&trip(), &forecast()).await;

        assert_eq!(outcome.artifacts.len(), 3);
        assert_eq!(outcome.truncated(), vec![ArtifactKind::DailyRoutine]);
        assert!(!outcome.get(ArtifactKind::PackingList).unwrap().truncated);
    }

    #[tokio::test]
    async fn test_packing_list_only() {
        let llm = Arc::new(MockLlmClient::ok(&["pack"]));
        let outcome = generator(llm.clone(), &[]).generate(&trip(), &forecast()).await;
        assert_eq!(outcome.artifacts.len(), 1);
        assert_eq!(llm.call_count(), 1);
    }
}
