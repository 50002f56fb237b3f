#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Forge Core Library
//!
//! Core types, traits, and utilities for the Forge frontend generation pipeline.

pub mod config;
pub mod error;
pub mod llm;
pub mod types;

// Re-exports for convenience
pub use config::ForgeConfig;
pub use error::{Error, Result};
pub use types::{
    FrontendState, GuardrailVerdict, PipelineStatus, RetryDecision, StepId, StepMetadata,
    TestReport, WorkflowId,
};
