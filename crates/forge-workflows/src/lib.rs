#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Forge Workflows Library
//!
//! Workflow definitions and routing for the Forge pipeline.

pub mod events;
pub mod frontend;
pub mod routing;

pub use events::PipelineEvent;
pub use frontend::{FrontendInput, FrontendOutput, FrontendWorkflow};
pub use routing::{MAX_RETRIES, RouteDecision, should_proceed, should_retry};

// Re-export core types
pub use forge_core::{Error, Result};
