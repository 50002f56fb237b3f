//! Integration tests for the progress event stream.

use forge_core::{PipelineStatus, StepId};
use forge_workflows::{FrontendInput, PipelineEvent};
use std::sync::Arc;

use crate::common::{
    TestHarness, event_types, mock_always_broken, mock_fail_then_pass, mock_pass_immediately,
};

#[tokio::test]
async fn test_passing_run_event_order() {
    let mut harness = TestHarness::with_llm(mock_pass_immediately());
    let input = FrontendInput::new("Build a login page");

    harness.workflow().run(input.clone()).await.unwrap();
    let events = harness.drain_events();

    assert_eq!(
        events.first(),
        Some(&PipelineEvent::Started {
            workflow_id: input.workflow_id,
            user_request: "Build a login page".to_string(),
            max_retries: 2,
        })
    );
    assert_eq!(
        event_types(&events),
        [
            "started",
            "guardrail_passed",
            "design_ready",
            "code_generated",
            "test_passed",
            "finished"
        ]
    );
    assert_eq!(
        events.last(),
        Some(&PipelineEvent::Finished {
            status: PipelineStatus::Passed
        })
    );
}

#[tokio::test]
async fn test_step_events_bracket_each_stage() {
    let mut harness = TestHarness::new();
    harness
        .workflow()
        .run(FrontendInput::new("Build a login page"))
        .await
        .unwrap();

    let started: Vec<StepId> = harness
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            PipelineEvent::StepStarted { step, .. } => Some(step),
            _ => None,
        })
        .collect();
    assert_eq!(
        started,
        [
            StepId::guardrail(),
            StepId::design(),
            StepId::codegen(),
            StepId::test()
        ]
    );
}

#[tokio::test]
async fn test_retry_events() {
    let mut harness = TestHarness::with_llm(mock_fail_then_pass());
    harness
        .workflow()
        .run(FrontendInput::new("Build a login page"))
        .await
        .unwrap();

    let events = harness.drain_events();
    assert!(events.contains(&PipelineEvent::TestFailed {
        attempt: 1,
        report: "FAILED: Missing submit button".to_string(),
    }));
    assert!(events.contains(&PipelineEvent::Retrying {
        attempt: 1,
        max_retries: 2,
    }));
    assert_eq!(
        event_types(&events),
        [
            "started",
            "guardrail_passed",
            "design_ready",
            "code_generated",
            "test_failed",
            "retrying",
            "code_generated",
            "test_passed",
            "finished"
        ]
    );
}

#[tokio::test]
async fn test_exhausted_run_reports_max_retries() {
    let mut harness = TestHarness::with_llm(mock_always_broken());
    harness
        .workflow()
        .run(FrontendInput::new("Build a login page"))
        .await
        .unwrap();

    let events = harness.drain_events();
    let types = event_types(&events);
    assert_eq!(types.iter().filter(|t| *t == "retrying").count(), 2);
    assert!(events.contains(&PipelineEvent::MaxRetriesReached { max_retries: 2 }));
    assert_eq!(
        events.last(),
        Some(&PipelineEvent::Finished {
            status: PipelineStatus::TestsFailed
        })
    );
}

#[tokio::test]
async fn test_blocked_run_events() {
    let mut harness = TestHarness::new();
    harness
        .workflow()
        .run(FrontendInput::new("drop table users"))
        .await
        .unwrap();

    let events = harness.drain_events();
    assert_eq!(
        event_types(&events),
        ["started", "guardrail_blocked", "finished"]
    );
    assert!(events.contains(&PipelineEvent::GuardrailBlocked {
        keyword: "drop table".to_string(),
        reason: "Request blocked by guardrail: 'drop table' is not allowed.".to_string(),
    }));
}

#[tokio::test]
async fn test_codegen_failure_event() {
    let llm = Arc::new(forge_core::llm::MockLlmProvider::failing("boom"));
    let mut harness = TestHarness::with_llm(llm);
    harness
        .workflow()
        .with_max_retries(0)
        .run(FrontendInput::new("Build a login page"))
        .await
        .unwrap();

    let events = harness.drain_events();
    assert!(events.contains(&PipelineEvent::CodegenFailed {
        attempt: 1,
        error: "LLM error: boom".to_string(),
    }));
}
