//! Scripted provider for tests and offline runs.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::{CompletionRequest, CompletionResponse, LlmProvider, TokenUsage};
use crate::{Error, Result};

#[derive(Debug)]
enum Script {
    /// Responses handed out in order; exhausted scripts fail.
    Sequence(VecDeque<String>),
    /// The same response for every call.
    Repeat(String),
    /// Every call fails with this message.
    Fail(String),
}

/// Mock LLM provider that replays canned responses.
///
/// Every request is recorded so tests can assert on prompts.
#[derive(Debug)]
pub struct MockLlmProvider {
    script: Mutex<Script>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlmProvider {
    /// Returns `responses` in order, one per call.
    pub fn new(responses: Vec<String>) -> Self {
        Self::from_script(Script::Sequence(responses.into()))
    }

    /// Returns the same response for every call.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self::from_script(Script::Repeat(response.into()))
    }

    /// Fails every call with an LLM error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_script(Script::Fail(message.into()))
    }

    fn from_script(script: Script) -> Self {
        Self {
            script: Mutex::new(script),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn next_response(&self) -> Result<String> {
        let mut script = self
            .script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match &mut *script {
            Script::Sequence(queue) => queue
                .pop_front()
                .ok_or_else(|| Error::llm("Mock provider has no responses left")),
            Script::Repeat(response) => Ok(response.clone()),
            Script::Fail(message) => Err(Error::llm(message.clone())),
        }
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let input = request
            .messages
            .iter()
            .map(|m| m.content.split_whitespace().count() as u64)
            .sum();
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        let content = self.next_response()?;
        let output = content.split_whitespace().count() as u64;

        Ok(CompletionResponse {
            content,
            tokens_used: TokenUsage { input, output },
            stop_reason: Some("end_turn".to_string()),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
