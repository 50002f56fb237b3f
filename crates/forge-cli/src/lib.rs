//! # forge-cli
//!
//! Command-line front end for the Forge pipeline:
//! - `run`: full guardrail, design, codegen, test and retry pipeline
//! - `check`: guardrail only
//! - `demo`: the normal and dangerous request scenarios
//! - `config`: path, show, init

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config_handlers;
pub mod transcript;

pub use cli::{Args, Command, ConfigAction};
