//! The stage abstraction.

use async_trait::async_trait;
use forge_core::{FrontendState, Result, StepId};

/// A pipeline stage.
///
/// Stages own the state while they run and hand back the updated copy.
/// Returning `Err` aborts the whole run, so stages that have a routing
/// outcome (a blocked request, a failed provider call) record it in the
/// state instead.
#[async_trait]
pub trait Step: Send + Sync {
    /// Stage name used in logs, events, and step records.
    fn id(&self) -> StepId;

    /// Runs the stage.
    async fn run(&self, state: FrontendState) -> Result<FrontendState>;
}
