//! Error handling coverage through the workflow crate's re-exports.

use forge_workflows::Error;

#[test]
fn test_llm_error_is_retryable() {
    let err = Error::llm("API request failed");
    assert_eq!(err.to_string(), "LLM error: API request failed");
    assert!(err.is_retryable());
}

#[test]
fn test_timeout_error() {
    let err = Error::Timeout { seconds: 60 };
    assert_eq!(err.to_string(), "Request timed out after 60s");
    assert!(err.is_retryable());
}

#[test]
fn test_blocked_error_message() {
    let err = Error::blocked("shutdown");
    assert_eq!(
        err.to_string(),
        "Request blocked by guardrail: 'shutdown' is not allowed."
    );
    assert!(!err.is_retryable(), "Blocked requests must never be retried");
}

#[test]
fn test_max_retries_exceeded_error() {
    let err = Error::MaxRetriesExceeded { attempts: 2 };
    assert_eq!(err.to_string(), "Maximum retries exceeded: 2 attempts");
    assert!(!err.is_retryable());
}

#[test]
fn test_validation_field_error() {
    let err = Error::validation_field("design_spec", "design must run before codegen");
    match &err {
        Error::Validation { field, message } => {
            assert_eq!(field.as_deref(), Some("design_spec"));
            assert_eq!(message, "design must run before codegen");
        }
        _ => unreachable!("Expected Validation error"),
    }
    assert!(!err.is_retryable());
}

#[test]
fn test_config_error_not_retryable() {
    let err = Error::config("missing api key");
    assert_eq!(err.to_string(), "Configuration error: missing api key");
    assert!(!err.is_retryable());
}
