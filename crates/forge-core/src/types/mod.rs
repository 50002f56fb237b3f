//! Core types for the Forge pipeline.

mod decision;
mod ids;
mod proptests;
mod state;
mod verdict;
mod workflow_state;

pub use decision::RetryDecision;
pub use ids::{StepId, WorkflowId};
pub use state::FrontendState;
pub use verdict::{ALL_TESTS_PASSED, GuardrailVerdict, NO_CODE_GENERATED, TestReport, block_message};
pub use workflow_state::{PipelineStatus, StepMetadata};
