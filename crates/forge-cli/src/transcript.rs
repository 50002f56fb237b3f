//! Console rendering of pipeline events.

use forge_core::StepId;
use forge_workflows::PipelineEvent;

/// Banner rule used by the demo.
pub const RULE: &str = "==================================================";

/// Shown when codegen runs without an API key.
pub const OFFLINE_NOTICE: &str = "⚠️  No API key found, using mock output.";

/// Shown when `--offline` forces mock output.
pub const FORCED_OFFLINE_NOTICE: &str = "⚠️  Offline mode, using mock output.";

/// Turns events into transcript lines.
///
/// Some lines need context from earlier events (the request text, the block
/// reason), so the renderer is stateful.
#[derive(Debug, Default)]
pub struct Transcript {
    request: String,
    blocked_reason: String,
    offline_notice: Option<&'static str>,
}

impl Transcript {
    /// Creates an empty renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renderer that prints `notice` on every codegen attempt in
    /// place of the code-generated line.
    pub fn offline(notice: &'static str) -> Self {
        Self {
            offline_notice: Some(notice),
            ..Self::default()
        }
    }

    /// Picks the renderer for how codegen is served.
    pub fn for_provider(online: bool, forced_offline: bool) -> Self {
        match (online, forced_offline) {
            (true, _) => Self::new(),
            (false, true) => Self::offline(FORCED_OFFLINE_NOTICE),
            (false, false) => Self::offline(OFFLINE_NOTICE),
        }
    }

    /// The line for `event`, if it has one.
    pub fn line(&mut self, event: &PipelineEvent) -> Option<String> {
        match event {
            PipelineEvent::Started { user_request, .. } => {
                self.request.clone_from(user_request);
                None
            }
            PipelineEvent::StepStarted { step, .. } => self.step_line(step),
            PipelineEvent::GuardrailPassed => Some("✅ Guardrail passed.".to_string()),
            PipelineEvent::GuardrailBlocked { keyword, reason } => {
                self.blocked_reason.clone_from(reason);
                Some(format!("🚨 BLOCKED: detected dangerous keyword '{keyword}'"))
            }
            PipelineEvent::DesignReady => Some("✅ Design: design spec ready.".to_string()),
            PipelineEvent::CodeGenerated { .. } if self.offline_notice.is_some() => None,
            PipelineEvent::CodeGenerated { .. } => Some("✅ Codegen: code generated.".to_string()),
            PipelineEvent::CodegenFailed { error, .. } => Some(format!("❌ Codegen error: {error}")),
            PipelineEvent::TestPassed => Some("✅ Test passed.".to_string()),
            PipelineEvent::TestFailed { report, .. } => Some(format!("❌ Test failed: {report}")),
            PipelineEvent::Retrying {
                attempt,
                max_retries,
            } => Some(format!("🔄 Retrying... (attempt {attempt}/{max_retries})")),
            PipelineEvent::MaxRetriesReached { max_retries } => {
                Some(format!("⚠️  Max retries ({max_retries}) reached. Stopping."))
            }
            PipelineEvent::StepCompleted { .. } | PipelineEvent::Finished { .. } => None,
        }
    }

    fn step_line(&self, step: &StepId) -> Option<String> {
        match step.as_str() {
            "guardrail" => Some("🛡️  Guardrail check...".to_string()),
            "design" => Some(format!("🎨 Design: designing UI for '{}'...", self.request)),
            "codegen" => match self.offline_notice {
                Some(notice) => Some(format!(
                    "💻 Codegen: generating code from design spec...\n{notice}"
                )),
                None => Some("💻 Codegen: generating code from design spec...".to_string()),
            },
            "test" => Some("🧪 Test: validating generated code...".to_string()),
            "blocked" => Some(format!("🚫 Request blocked. Reason: {}", self.blocked_reason)),
            _ => None,
        }
    }
}

/// Prints a demo section banner.
pub fn print_banner(title: &str) {
    println!("\n{RULE}");
    println!("{title}");
    println!("{RULE}");
}
