//! Configuration loading.
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. built-in defaults,
//! 2. a TOML file (explicit `--config` path, or `<config dir>/forge/config.toml`),
//! 3. environment variables (`ANTHROPIC_API_KEY`, `ANTHROPIC_MODEL`,
//!    `FORGE_MAX_RETRIES`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::llm::{DEFAULT_BASE_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use crate::{Error, Result};

/// Retries after the first failed validation.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Keywords that block a request, checked in order.
pub const DEFAULT_BLOCKED_KEYWORDS: &[&str] = &[
    "delete all",
    "drop table",
    "rm -rf",
    "format disk",
    "shutdown",
    "hack",
    "steal",
    "inject",
    "bypass security",
];

/// Environment variable holding the Anthropic API key.
pub const ENV_API_KEY: &str = "ANTHROPIC_API_KEY";
/// Environment variable overriding the model.
pub const ENV_MODEL: &str = "ANTHROPIC_MODEL";
/// Environment variable overriding the retry budget.
pub const ENV_MAX_RETRIES: &str = "FORGE_MAX_RETRIES";

const PROJECT_DIR: &str = "forge";
const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Claude provider settings
    pub llm: LlmConfig,
    /// Pipeline control
    pub pipeline: PipelineConfig,
    /// Guardrail keyword list
    pub guardrail: GuardrailConfig,
    /// Code validation rules
    pub validation: ValidationConfig,
}

/// Claude provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API key; without one, codegen runs offline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// Completion budget per codegen call
    pub max_tokens: u32,
    /// API host
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Attempts per provider call, including the first
    pub max_attempts: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Pipeline control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Codegen retries after a failed test
    pub max_retries: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Guardrail keyword list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardrailConfig {
    /// Replaces the built-in list when set
    pub blocked_keywords: Vec<String>,
    /// Appended to `blocked_keywords`
    pub extra_keywords: Vec<String>,
}

impl Default for GuardrailConfig {
    fn default() -> Self {
        Self {
            blocked_keywords: DEFAULT_BLOCKED_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            extra_keywords: Vec::new(),
        }
    }
}

impl GuardrailConfig {
    /// The effective keyword list, in check order.
    pub fn keywords(&self) -> Vec<String> {
        self.blocked_keywords
            .iter()
            .chain(self.extra_keywords.iter())
            .cloned()
            .collect()
    }
}

/// A structural requirement on generated code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Issue reported when the rule fails
    pub issue: String,
    /// The rule passes if the code contains any of these (case-insensitive)
    pub any_of: Vec<String>,
}

/// Code validation rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Rules checked in order
    pub rules: Vec<RuleConfig>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        let rule = |issue: &str, any_of: &[&str]| RuleConfig {
            issue: issue.to_string(),
            any_of: any_of.iter().map(|s| s.to_string()).collect(),
        };
        Self {
            rules: vec![
                rule("Missing form element", &["form"]),
                rule("Missing input fields", &["input"]),
                rule("Missing submit button", &["button", "submit"]),
            ],
        }
    }
}

impl ForgeConfig {
    /// Loads configuration from a file and the process environment.
    ///
    /// An explicit path must exist. The default path is optional; when it is
    /// missing, built-in defaults are used.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(Path::new(p))?,
            None => match Self::default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parses a TOML file without applying environment overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Parses TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Applies environment-style overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
            self.llm.api_key = Some(key);
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|m| !m.trim().is_empty()) {
            self.llm.model = model;
        }
        if let Some(raw) = lookup(ENV_MAX_RETRIES) {
            self.pipeline.max_retries = raw.trim().parse().map_err(|_| {
                Error::config(format!("{ENV_MAX_RETRIES} must be a non-negative integer, got '{raw}'"))
            })?;
        }
        Ok(())
    }

    /// Returns `true` when a non-empty API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.llm
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// `<config dir>/forge/config.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(PROJECT_DIR).join(CONFIG_FILE))
    }

    /// The path `load` would read for the given override.
    pub fn resolve_config_path(path: Option<&str>) -> Option<PathBuf> {
        match path {
            Some(p) => Some(PathBuf::from(p)),
            None => Self::default_config_path(),
        }
    }

    /// Serializes to pretty TOML. The API key is never written.
    pub fn to_toml_string(&self) -> Result<String> {
        let mut redacted = self.clone();
        redacted.llm.api_key = None;
        toml::to_string_pretty(&redacted).map_err(|e| Error::config(e.to_string()))
    }
}
