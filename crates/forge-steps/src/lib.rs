#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Forge Steps Library
//!
//! Stage implementations for the Forge pipeline.

pub mod codegen;
pub mod design;
pub mod guardrail;
pub mod step;
pub mod validate;

pub use codegen::{CodegenStep, OFFLINE_LOGIN_FORM};
pub use design::{DesignStep, Designer, TemplateDesigner};
pub use guardrail::Guardrail;
pub use step::Step;
pub use validate::{CodeValidator, ValidationRule};

// Re-export core types
pub use forge_core::{Error, Result};
