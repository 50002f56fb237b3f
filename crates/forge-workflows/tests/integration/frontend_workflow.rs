//! Integration tests for the frontend generation workflow.

use async_trait::async_trait;
use forge_core::llm::MockLlmProvider;
use forge_core::{Error, ForgeConfig, PipelineStatus, StepId};
use forge_steps::{Designer, OFFLINE_LOGIN_FORM};
use forge_workflows::{FrontendInput, FrontendWorkflow};
use std::sync::Arc;

use crate::common::{
    NO_SUBMIT_CODE, TestHarness, mock_always_broken, mock_fail_then_pass, mock_pass_immediately,
};

fn step_names(output: &forge_workflows::FrontendOutput) -> Vec<&str> {
    output.steps.iter().map(|m| m.step_id.as_str()).collect()
}

#[tokio::test]
async fn test_login_page_passes_on_first_attempt() {
    let harness = TestHarness::with_llm(mock_pass_immediately());
    let input = FrontendInput::new("Build a login page with email and password");

    let output = harness
        .workflow()
        .run(input.clone())
        .await
        .expect("Workflow should complete successfully");

    assert_eq!(output.workflow_id, input.workflow_id);
    assert!(output.is_passed());
    assert!(output.guardrail.is_passed());
    assert_eq!(output.state.guardrail_passed, Some(true));
    assert_eq!(output.state.retry_count, 0);
    assert_eq!(output.final_result().as_deref(), Some("All tests passed"));
    assert_eq!(
        output.state.generated_code.as_deref(),
        Some(OFFLINE_LOGIN_FORM.trim())
    );
    assert!(
        output
            .state
            .design_spec
            .as_deref()
            .unwrap()
            .starts_with("Design spec for: Build a login page")
    );
    assert_eq!(step_names(&output), ["guardrail", "design", "codegen", "test"]);
    assert_eq!(harness.llm.call_count(), 1);
}

#[tokio::test]
async fn test_retry_then_pass() {
    let harness = TestHarness::with_llm(mock_fail_then_pass());

    let output = harness
        .workflow()
        .run(FrontendInput::new("Build a login page"))
        .await
        .expect("Workflow should complete after one retry");

    assert!(output.is_passed());
    assert_eq!(output.state.retry_count, 1);
    assert_eq!(
        step_names(&output),
        [
            "guardrail",
            "design",
            "codegen",
            "test",
            "increment_retry",
            "codegen",
            "test"
        ]
    );
    assert_eq!(output.step_count(&StepId::design()), 1, "Design runs once");

    // The retry prompt carries the previous failure.
    let requests = harness.llm.requests();
    assert_eq!(requests.len(), 2);
    let retry_prompt = requests[1].last_user_message().unwrap();
    assert!(retry_prompt.contains("FAILED: Missing submit button"));
}

#[tokio::test]
async fn test_max_retries_stops_loop() {
    let harness = TestHarness::with_llm(mock_always_broken());

    let output = harness
        .workflow()
        .run(FrontendInput::new("Build a login page"))
        .await
        .expect("Exhausted retries are a normal outcome");

    assert_eq!(output.status, PipelineStatus::TestsFailed);
    assert_eq!(output.state.retry_count, 2);
    assert_eq!(harness.llm.call_count(), 3, "One attempt plus two retries");
    assert_eq!(
        output.final_result().as_deref(),
        Some("FAILED: Missing form element, Missing input fields, Missing submit button")
    );
    assert_eq!(output.step_count(&StepId::increment_retry()), 2);

    let err = output.into_result().unwrap_err();
    assert!(matches!(err, Error::MaxRetriesExceeded { attempts: 2 }));
}

#[tokio::test]
async fn test_custom_retry_budget_from_input() {
    let harness = TestHarness::with_llm(mock_always_broken());

    let output = harness
        .workflow()
        .run(FrontendInput::new("Build a login page").with_max_retries(0))
        .await
        .unwrap();

    assert_eq!(output.status, PipelineStatus::TestsFailed);
    assert_eq!(output.state.retry_count, 0);
    assert_eq!(harness.llm.call_count(), 1);
}

#[tokio::test]
async fn test_rm_rf_request_is_blocked() {
    let harness = TestHarness::new();

    let output = harness
        .workflow()
        .run(FrontendInput::new("please rm -rf the server"))
        .await
        .unwrap();

    assert_eq!(output.status, PipelineStatus::Blocked);
    assert_eq!(output.state.guardrail_passed, Some(false));
    assert_eq!(output.guardrail.keyword(), Some("rm -rf"));
    assert_eq!(
        output.blocked_reason(),
        Some("Request blocked by guardrail: 'rm -rf' is not allowed.")
    );
    assert!(output.state.generated_code.is_none());
    assert!(output.final_result().is_none());
    assert_eq!(step_names(&output), ["guardrail", "blocked"]);
    assert_eq!(harness.llm.call_count(), 0, "No LLM calls when blocked");
}

#[tokio::test]
async fn test_block_is_case_insensitive() {
    let harness = TestHarness::new();

    let output = harness
        .workflow()
        .run(FrontendInput::new("Build a page that can HACK accounts"))
        .await
        .unwrap();

    assert_eq!(output.status, PipelineStatus::Blocked);
    assert_eq!(output.guardrail.keyword(), Some("hack"));
}

#[tokio::test]
async fn test_provider_failure_flows_into_retry_loop() {
    let harness = TestHarness::with_llm(Arc::new(MockLlmProvider::failing("service unavailable")));

    let output = harness
        .workflow()
        .run(FrontendInput::new("Build a login page"))
        .await
        .expect("Provider failures are recorded, not raised");

    assert_eq!(output.status, PipelineStatus::TestsFailed);
    assert_eq!(output.final_result().as_deref(), Some("FAILED: No code was generated"));
    assert_eq!(
        output.state.error.as_deref(),
        Some("LLM error: service unavailable")
    );
    assert_eq!(harness.llm.call_count(), 3);
}

#[tokio::test]
async fn test_failed_retry_clears_stale_code() {
    // One good answer then an exhausted script: the second call fails.
    let llm = Arc::new(MockLlmProvider::new(vec![NO_SUBMIT_CODE.to_string()]));
    let harness = TestHarness::with_llm(llm);

    let output = harness
        .workflow()
        .with_max_retries(1)
        .run(FrontendInput::new("Build a login page"))
        .await
        .unwrap();

    assert_eq!(output.status, PipelineStatus::TestsFailed);
    assert!(output.state.generated_code.is_none(), "Stale code is cleared");
    assert_eq!(output.final_result().as_deref(), Some("FAILED: No code was generated"));
}

#[tokio::test]
async fn test_from_config_uses_configured_budget_and_keywords() {
    let config = ForgeConfig::from_toml_str(
        r#"
[pipeline]
max_retries = 1

[guardrail]
extra_keywords = ["crypto miner"]
"#,
    )
    .unwrap();

    let llm = mock_always_broken();
    let workflow = FrontendWorkflow::from_config(llm.clone(), &config);

    let output = workflow
        .run(FrontendInput::new("Build a login page"))
        .await
        .unwrap();
    assert_eq!(output.state.retry_count, 1);
    assert_eq!(llm.call_count(), 2);

    let blocked = workflow
        .run(FrontendInput::new("Embed a Crypto Miner in the footer"))
        .await
        .unwrap();
    assert_eq!(blocked.guardrail.keyword(), Some("crypto miner"));
}

#[tokio::test]
async fn test_offline_workflow() {
    let output = FrontendWorkflow::offline()
        .run(FrontendInput::new("Build a login page"))
        .await
        .unwrap();
    assert!(output.is_passed());
    assert!(output.into_result().is_ok());
}

struct BrokenDesigner;

#[async_trait]
impl Designer for BrokenDesigner {
    async fn design(&self, _request: &str) -> forge_core::Result<String> {
        Err(Error::validation("design service offline"))
    }
}

#[tokio::test]
async fn test_stage_error_aborts_run() {
    let harness = TestHarness::new();

    let result = harness
        .workflow()
        .with_designer(Arc::new(BrokenDesigner))
        .run(FrontendInput::new("Build a login page"))
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Validation error: design service offline");
    assert_eq!(harness.llm.call_count(), 0);
}
