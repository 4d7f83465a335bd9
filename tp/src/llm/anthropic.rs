//! Anthropic Claude API client implementation
//!
//! Implements the LlmClient trait for Anthropic's Messages API. The request body
//! and response parsing are shared with the Bedrock client, which speaks the
//! same message format.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError, StopReason, TokenUsage};
use crate::config::LlmConfig;

/// Messages API version header sent to api.anthropic.com
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default base URL for the direct API
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Anthropic Claude API client
pub struct AnthropicClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl AnthropicClient {
    /// Create a new client from configuration
    ///
    /// Reads the API key from the environment variable named in config.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(?config, "from_config: called");
        let api_key = config.get_api_key().map_err(|e| LlmError::Config(e.to_string()))?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build().map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            http,
            max_tokens: config.max_tokens,
        })
    }

    /// Build the request body for the Anthropic API
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        debug!(%self.model, %request.max_tokens, "build_request_body: called");
        let mut body = messages_body(request, self.max_tokens);
        body["model"] = serde_json::json!(self.model);
        body
    }
}

/// Provider-neutral Messages API body: turns, limits and optional system prompt
pub(super) fn messages_body(request: &CompletionRequest, max_tokens_cap: u32) -> serde_json::Value {
    debug!(message_count = %request.messages.len(), "messages_body: called");
    let mut body = serde_json::json!({
        "max_tokens": request.max_tokens.min(max_tokens_cap),
        "temperature": request.temperature,
        "messages": request.messages,
    });

    if let Some(system) = &request.system_prompt {
        debug!("messages_body: adding system prompt");
        body["system"] = serde_json::json!(system);
    }

    body
}

/// Turn an HTTP response from a Messages API endpoint into a CompletionResponse
pub(super) async fn read_messages_response(response: reqwest::Response) -> Result<CompletionResponse, LlmError> {
    let status = response.status().as_u16();
    if !response.status().is_success() {
        debug!(%status, "read_messages_response: API error");
        let text = response.text().await.unwrap_or_default();
        return Err(LlmError::ApiError { status, message: text });
    }

    let text = response.text().await?;
    let api_response: MessagesResponse = serde_json::from_str(&text)?;
    parse_response(api_response)
}

/// Extract the first text block of the reply
fn parse_response(api_response: MessagesResponse) -> Result<CompletionResponse, LlmError> {
    debug!(?api_response.stop_reason, blocks = api_response.content.len(), "parse_response: called");
    let content = api_response
        .content
        .into_iter()
        .find_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
        .ok_or_else(|| LlmError::InvalidResponse("Response contained no text block".to_string()))?;

    let usage = api_response.usage.unwrap_or_default();
    Ok(CompletionResponse {
        content,
        stop_reason: StopReason::from_api(api_response.stop_reason.as_deref()),
        usage: TokenUsage {
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
        },
    })
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(%self.model, %request.max_tokens, "complete: called");
        let url = format!("{}/v1/messages", self.base_url);
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(url)
            .header("x-api-key", self.api_key.clone())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        read_messages_response(response).await
    }
}

// Messages API response types

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}
