//! Unique identifier types for workflows and pipeline steps.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a pipeline run.
///
/// Internally represented as a UUID v4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowId(Uuid);

impl WorkflowId {
    /// Creates a new random workflow ID.
    ///
    /// # Examples
    ///
    /// ```
    /// use forge_core::WorkflowId;
    ///
    /// let id = WorkflowId::new();
    /// println!("Workflow ID: {}", id);
    /// ```
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a workflow ID from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Converts to the inner UUID.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for WorkflowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for WorkflowId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::str::FromStr for WorkflowId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Name of a pipeline stage.
///
/// Step IDs are human-readable strings like "guardrail", "codegen", "test".
/// The well-known stages of the frontend pipeline have dedicated constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepId(String);

impl StepId {
    /// Creates a new step ID from a string.
    ///
    /// # Examples
    ///
    /// ```
    /// use forge_core::StepId;
    ///
    /// let id = StepId::new("codegen");
    /// assert_eq!(id, StepId::codegen());
    /// ```
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// The keyword filter that runs before anything else.
    pub fn guardrail() -> Self {
        Self::new("guardrail")
    }

    /// UI design spec generation.
    pub fn design() -> Self {
        Self::new("design")
    }

    /// HTML/CSS generation from the design spec.
    pub fn codegen() -> Self {
        Self::new("codegen")
    }

    /// Validation of the generated code.
    pub fn test() -> Self {
        Self::new("test")
    }

    /// Terminal stage for requests rejected by the guardrail.
    pub fn blocked() -> Self {
        Self::new("blocked")
    }

    /// Bookkeeping stage between a failed test and the next codegen.
    pub fn increment_retry() -> Self {
        Self::new("increment_retry")
    }

    /// Returns the step ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StepId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for StepId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
