//! Pipeline commands: run, check, demo.

use forge_core::llm::{ClaudeProvider, LlmProvider, MockLlmProvider, RetryWrapper};
use forge_core::{ForgeConfig, GuardrailVerdict, Result};
use forge_steps::{Guardrail, OFFLINE_LOGIN_FORM};
use forge_workflows::{FrontendInput, FrontendOutput, FrontendWorkflow};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::transcript::{Transcript, print_banner};

/// Request used by the first demo scenario.
pub const DEMO_NORMAL_REQUEST: &str = "Build a login page with email and password";

/// Request used by the second demo scenario.
pub const DEMO_DANGEROUS_REQUEST: &str = "rm -rf all project files";

/// Options for `forge run`.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Overrides the configured retry budget
    pub max_retries: Option<u32>,
    /// Forces the canned provider
    pub offline: bool,
    /// Prints JSON instead of a transcript
    pub json: bool,
}

/// A provider plus whether it calls the real API.
pub struct ProviderChoice {
    /// The provider codegen will use
    pub llm: Arc<dyn LlmProvider>,
    /// `true` when backed by Claude
    pub online: bool,
}

/// Picks Claude when an API key is configured, otherwise the canned provider.
pub fn build_provider(config: &ForgeConfig, force_offline: bool) -> ProviderChoice {
    let api_key = config
        .llm
        .api_key
        .as_deref()
        .filter(|_| config.has_api_key() && !force_offline);

    match api_key {
        Some(key) => {
            tracing::info!(model = %config.llm.model, "Using Claude LLM provider");
            let claude = ClaudeProvider::new(key, config.llm.model.clone())
                .with_base_url(config.llm.base_url.clone())
                .with_timeout(Duration::from_secs(config.llm.timeout_secs));
            ProviderChoice {
                llm: Arc::new(
                    RetryWrapper::new(Arc::new(claude)).with_max_attempts(config.llm.max_attempts),
                ),
                online: true,
            }
        }
        None => {
            if !force_offline {
                tracing::warn!("No API key configured, using offline mock output");
            }
            ProviderChoice {
                llm: Arc::new(MockLlmProvider::with_response(OFFLINE_LOGIN_FORM)),
                online: false,
            }
        }
    }
}

/// Runs the pipeline once, printing the transcript unless `quiet`.
pub async fn execute(
    config: &ForgeConfig,
    input: FrontendInput,
    force_offline: bool,
    quiet: bool,
) -> Result<FrontendOutput> {
    let provider = build_provider(config, force_offline);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let workflow = FrontendWorkflow::from_config(provider.llm, config).with_events(tx);

    let mut transcript = Transcript::for_provider(provider.online, force_offline);
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if !quiet && let Some(line) = transcript.line(&event) {
                println!("{line}");
            }
        }
    });

    let result = workflow.run(input).await;
    // Closes the channel so the printer drains and exits.
    drop(workflow);
    if let Err(e) = printer.await {
        tracing::warn!(error = %e, "Transcript printer stopped early");
    }
    result
}

/// `forge run`. Returns `true` when the generated code passed validation.
pub async fn cmd_run(config: &ForgeConfig, request: String, options: RunOptions) -> Result<bool> {
    let mut input = FrontendInput::new(request);
    if let Some(max) = options.max_retries {
        input = input.with_max_retries(max);
    }

    let output = execute(config, input, options.offline, options.json).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_outcome(&output);
    }
    Ok(output.is_passed())
}

/// `forge check`. Returns `true` when the request passes the guardrail.
pub fn cmd_check(config: &ForgeConfig, request: &str) -> bool {
    match Guardrail::from_config(&config.guardrail).check(request) {
        GuardrailVerdict::Passed => {
            println!("✅ Guardrail passed.");
            true
        }
        verdict @ GuardrailVerdict::Blocked { .. } => {
            println!(
                "🚨 BLOCKED: detected dangerous keyword '{}'",
                verdict.keyword().unwrap_or_default()
            );
            println!("{}", verdict.reason().unwrap_or_default());
            false
        }
    }
}

/// `forge demo`. Returns `true` when both scenarios end as expected.
pub async fn cmd_demo(config: &ForgeConfig, offline: bool) -> Result<bool> {
    print_banner("TEST 1: Normal request");
    let normal = execute(config, FrontendInput::new(DEMO_NORMAL_REQUEST), offline, false).await?;
    print_outcome(&normal);

    print_banner("TEST 2: Dangerous request (guardrail test)");
    let dangerous =
        execute(config, FrontendInput::new(DEMO_DANGEROUS_REQUEST), offline, false).await?;
    print_outcome(&dangerous);

    Ok(normal.is_passed() && dangerous.blocked_reason().is_some())
}

fn print_outcome(output: &FrontendOutput) {
    match output.blocked_reason() {
        Some(reason) => println!("\n🚫 Blocked reason: {reason}"),
        None => println!(
            "\n📄 Final result: {}",
            output.final_result().unwrap_or_default()
        ),
    }
}
