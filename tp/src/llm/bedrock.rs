//! AWS Bedrock runtime client for Anthropic models
//!
//! Uses the Bedrock `InvokeModel` REST endpoint with a Bedrock API key sent as a
//! bearer token. The body is the Messages API format with the Bedrock protocol
//! version tag in place of the model field.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::anthropic::{messages_body, read_messages_response};
use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError};
use crate::config::LlmConfig;

/// Protocol version tag Bedrock expects in the body
const BEDROCK_ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Bedrock runtime client
pub struct BedrockClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl BedrockClient {
    /// Create a new client from configuration
    ///
    /// The endpoint is `base-url` when set, otherwise derived from the region.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(?config, "BedrockClient::from_config: called");
        let api_key = config.get_api_key().map_err(|e| LlmError::Config(e.to_string()))?;

        let base_url = match (&config.base_url, config.resolved_region()) {
            (Some(url), _) => url.trim_end_matches('/').to_string(),
            (None, Some(region)) => format!("https://bedrock-runtime.{region}.amazonaws.com"),
            (None, None) => {
                return Err(LlmError::Config(
                    "Bedrock needs a region: set llm.region or AWS_REGION".to_string(),
                ));
            }
        };

        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build().map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url,
            http,
            max_tokens: config.max_tokens,
        })
    }

    fn invoke_url(&self) -> String {
        format!("{}/model/{}/invoke", self.base_url, self.model)
    }

    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let mut body = messages_body(request, self.max_tokens);
        body["anthropic_version"] = serde_json::json!(BEDROCK_ANTHROPIC_VERSION);
        body
    }
}

#[async_trait]
impl LlmClient for BedrockClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(%self.model, %request.max_tokens, "BedrockClient::complete: called");
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(self.invoke_url())
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .header("accept", "application/json")
            .json(&body)
            .send()
            .await?;

        read_messages_response(response).await
    }
}
