//! Common test utilities and harness for forge workflow integration tests.

#![allow(dead_code)]

use forge_core::llm::MockLlmProvider;
use forge_steps::OFFLINE_LOGIN_FORM;
use forge_workflows::{FrontendWorkflow, PipelineEvent};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Code that fails every default validation rule.
pub const BROKEN_CODE: &str = "<div>Hello there</div>";

/// Code with a form and inputs but no submit control.
pub const NO_SUBMIT_CODE: &str = "<form><input type='email' /></form>";

/// Test harness for integration tests.
///
/// Wraps a mock LLM provider and an event channel so tests can inspect both
/// the provider calls and the event stream.
pub struct TestHarness {
    /// Mock LLM provider for testing
    pub llm: Arc<MockLlmProvider>,
    events: mpsc::UnboundedReceiver<PipelineEvent>,
    sender: mpsc::UnboundedSender<PipelineEvent>,
}

impl TestHarness {
    /// Creates a harness whose provider always returns the canned login form.
    pub fn new() -> Self {
        Self::with_llm(mock_pass_immediately())
    }

    /// Creates a harness around a custom mock provider.
    pub fn with_llm(llm: Arc<MockLlmProvider>) -> Self {
        let (sender, events) = mpsc::unbounded_channel();
        Self {
            llm,
            events,
            sender,
        }
    }

    /// Builds a workflow wired to this harness's provider and event channel.
    pub fn workflow(&self) -> FrontendWorkflow {
        FrontendWorkflow::new(self.llm.clone()).with_events(self.sender.clone())
    }

    /// Drains every event emitted so far.
    pub fn drain_events(&mut self) -> Vec<PipelineEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock LLM whose first answer passes validation.
pub fn mock_pass_immediately() -> Arc<MockLlmProvider> {
    Arc::new(MockLlmProvider::with_response(OFFLINE_LOGIN_FORM))
}

/// Mock LLM that produces incomplete code once, then a valid form.
pub fn mock_fail_then_pass() -> Arc<MockLlmProvider> {
    Arc::new(MockLlmProvider::new(vec![
        NO_SUBMIT_CODE.to_string(),
        OFFLINE_LOGIN_FORM.to_string(),
    ]))
}

/// Mock LLM that never produces valid code.
pub fn mock_always_broken() -> Arc<MockLlmProvider> {
    Arc::new(MockLlmProvider::with_response(BROKEN_CODE))
}

/// Event type tags, for compact ordering assertions.
pub fn event_types(events: &[PipelineEvent]) -> Vec<String> {
    events
        .iter()
        .filter(|e| {
            !matches!(
                e,
                PipelineEvent::StepStarted { .. } | PipelineEvent::StepCompleted { .. }
            )
        })
        .map(|e| {
            serde_json::to_value(e)
                .ok()
                .and_then(|v| v["type"].as_str().map(str::to_string))
                .unwrap_or_default()
        })
        .collect()
}
