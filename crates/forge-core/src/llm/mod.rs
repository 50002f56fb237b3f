//! LLM provider abstraction.
//!
//! Pipeline stages talk to language models only through [`LlmProvider`].
//! [`ClaudeProvider`] calls the Anthropic Messages API, [`MockLlmProvider`]
//! replays scripted responses (tests and offline mode), and [`RetryWrapper`]
//! adds exponential backoff around any provider.

mod claude;
mod mock;
mod retry;

pub use claude::{ClaudeProvider, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use mock::MockLlmProvider;
pub use retry::{DEFAULT_MAX_ATTEMPTS, RetryWrapper};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Default completion budget, matching the codegen stage's needs.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// End user
    User,
    /// Model
    Assistant,
}

/// A single conversation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote the message
    pub role: Role,
    /// Plain text content
    pub content: String,
}

impl Message {
    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A request for a single completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Conversation so far
    pub messages: Vec<Message>,
    /// Optional system prompt
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Optional sampling temperature
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Creates a request with default limits.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            system_prompt: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
        }
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Content of the last user message, if any.
    pub fn last_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

/// Token accounting for a completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens
    pub input: u64,
    /// Generated tokens
    pub output: u64,
}

impl TokenUsage {
    /// Total tokens billed.
    pub fn total(&self) -> u64 {
        self.input + self.output
    }
}

/// A completed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text
    pub content: String,
    /// Token usage reported by the provider
    pub tokens_used: TokenUsage,
    /// Why generation stopped, if reported
    pub stop_reason: Option<String>,
}

/// A language model backend.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generates a completion for the request.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Short provider name for logs.
    fn name(&self) -> &str;
}
