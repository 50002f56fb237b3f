//! Command-line argument definitions.

use clap::{Parser, Subcommand};

/// Forge - guarded frontend generation from natural-language requests
#[derive(Parser, Debug)]
#[command(name = "forge", author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true, env = "FORGE_CONFIG")]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// The tracing filter directive implied by the flags.
    pub fn log_directive(&self) -> &str {
        if self.verbose { "debug" } else { &self.log_level }
    }
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full pipeline for a request
    Run {
        /// The frontend request, e.g. "Build a login page"
        #[arg(required = true, num_args = 1..)]
        request: Vec<String>,

        /// Codegen retries after a failed test
        #[arg(long)]
        max_retries: Option<u32>,

        /// Use the canned login form instead of calling Claude
        #[arg(long)]
        offline: bool,

        /// Print the final output as JSON instead of a transcript
        #[arg(long)]
        json: bool,
    },

    /// Run only the guardrail against a request
    Check {
        /// The request to check
        #[arg(required = true, num_args = 1..)]
        request: Vec<String>,
    },

    /// Run a normal request and a blocked request back to back
    Demo {
        /// Use the canned login form instead of calling Claude
        #[arg(long)]
        offline: bool,
    },

    /// Configuration management
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print the effective configuration (API key redacted)
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Joins multi-word request arguments back into one string.
pub fn join_request(words: &[String]) -> String {
    words.join(" ")
}
