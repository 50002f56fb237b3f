//! Forge CLI
//!
//! Runs the guarded frontend generation pipeline from the command line.

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use forge_cli::cli::join_request;
use forge_cli::commands::{self, RunOptions};
use forge_cli::config_handlers::handle_config_command;
use forge_cli::{Args, Command};
use forge_core::ForgeConfig;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr so the transcript on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(args.log_directive())),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = args.config.as_deref();

    let ok = match args.command {
        Command::Config { action } => {
            handle_config_command(config_path, action)?;
            true
        }
        Command::Check { request } => {
            let config = ForgeConfig::load(config_path).context("Failed to load configuration")?;
            commands::cmd_check(&config, &join_request(&request))
        }
        Command::Run {
            request,
            max_retries,
            offline,
            json,
        } => {
            let config = ForgeConfig::load(config_path).context("Failed to load configuration")?;
            let options = RunOptions {
                max_retries,
                offline,
                json,
            };
            commands::cmd_run(&config, join_request(&request), options).await?
        }
        Command::Demo { offline } => {
            let config = ForgeConfig::load(config_path).context("Failed to load configuration")?;
            commands::cmd_demo(&config, offline).await?
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
