//! Anthropic Messages API provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{CompletionRequest, CompletionResponse, LlmProvider, Message, TokenUsage};
use crate::{Error, Result};

/// Public Anthropic API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const ERROR_BODY_LIMIT: usize = 320;

#[derive(Debug, Serialize)]
struct MessagesPayload<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Usage,
}

/// Claude provider backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ClaudeProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl ClaudeProvider {
    /// Creates a provider for the public API.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Points the provider at a different host (proxy, test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }

    fn map_send_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            Error::llm_with_source("Claude request failed", err)
        }
    }
}

#[async_trait]
impl LlmProvider for ClaudeProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let payload = MessagesPayload {
            model: &self.model,
            max_tokens: request.max_tokens,
            messages: &request.messages,
            system: request
                .system_prompt
                .as_deref()
                .filter(|s| !s.trim().is_empty()),
            temperature: request.temperature,
        };

        tracing::debug!(
            model = %self.model,
            max_tokens = request.max_tokens,
            messages = request.messages.len(),
            "Sending Claude request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .timeout(self.timeout)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| Error::llm_with_source("Invalid Claude response", e))?;

        let content = body
            .content
            .iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n");

        if content.trim().is_empty() {
            return Err(Error::llm("Claude returned no text content"));
        }

        let tokens_used = TokenUsage {
            input: body.usage.input_tokens,
            output: body.usage.output_tokens,
        };

        tracing::debug!(
            tokens = tokens_used.total(),
            stop_reason = ?body.stop_reason,
            "Claude request completed"
        );

        Ok(CompletionResponse {
            content,
            tokens_used,
            stop_reason: body.stop_reason,
        })
    }

    fn name(&self) -> &str {
        "claude"
    }
}

/// Maps a failed status to an error whose retryability matches the status.
///
/// Timeouts, rate limits and server errors are transient. Other client errors
/// (bad key, unknown model, malformed request) fail the same way every time.
fn status_error(status: reqwest::StatusCode, body: &str) -> Error {
    let message = format!(
        "Claude API error {}: {}",
        status,
        truncate(body, ERROR_BODY_LIMIT)
    );
    match status.as_u16() {
        401 | 403 => Error::config(message),
        408 | 429 => Error::llm(message),
        400..=499 => Error::validation(message),
        _ => Error::llm(message),
    }
}

fn truncate(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
