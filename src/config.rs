//! Configuration management for Thinkloop
//!
//! Configuration is layered: YAML file, then environment variables, then
//! command-line overrides. API keys only ever come from the environment.

use crate::agent_mode::AgentMode;
use crate::cli::{Cli, Commands};
use crate::error::{Result, ThinkloopError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Provider names accepted in `provider.type`
pub const PROVIDER_TYPES: [&str; 4] = ["auto", "openai", "openrouter", "gemini"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Model backend settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Session behavior
    #[serde(default)]
    pub agent: AgentConfig,
}

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Backend to use: auto, openai, openrouter or gemini
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    /// Model override applied to whichever backend is selected
    #[serde(default)]
    pub model: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// OpenAI settings
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// OpenRouter settings
    #[serde(default)]
    pub openrouter: OpenRouterConfig,

    /// Gemini settings
    #[serde(default)]
    pub gemini: GeminiConfig,
}

fn default_provider_type() -> String {
    "auto".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            model: None,
            request_timeout_seconds: default_request_timeout(),
            openai: OpenAiConfig::default(),
            openrouter: OpenRouterConfig::default(),
            gemini: GeminiConfig::default(),
        }
    }
}

/// OpenAI chat-completions backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Model name
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// API base URL (override for proxies and tests)
    #[serde(default = "default_openai_api_base")]
    pub api_base: String,

    /// Completion token cap
    #[serde(default = "default_openai_max_tokens")]
    pub max_tokens: u32,

    /// Read from `OPENAI_API_KEY`, never from the file
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_openai_model() -> String {
    "gpt-4.1-nano".to_string()
}

fn default_openai_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_max_tokens() -> u32 {
    9060
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            model: default_openai_model(),
            api_base: default_openai_api_base(),
            max_tokens: default_openai_max_tokens(),
            api_key: None,
        }
    }
}

/// OpenRouter backend (OpenAI-compatible wire format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRouterConfig {
    /// Model name
    #[serde(default = "default_openrouter_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_openrouter_api_base")]
    pub api_base: String,

    /// Completion token cap
    #[serde(default = "default_openrouter_max_tokens")]
    pub max_tokens: u32,

    /// Read from `OPENROUTER_API_KEY`
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_openrouter_model() -> String {
    "meta-llama/llama-3.1-8b-instruct".to_string()
}

fn default_openrouter_api_base() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_openrouter_max_tokens() -> u32 {
    1000
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            model: default_openrouter_model(),
            api_base: default_openrouter_api_base(),
            max_tokens: default_openrouter_max_tokens(),
            api_key: None,
        }
    }
}

/// Google Gemini backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model name
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,

    /// Output token cap
    #[serde(default = "default_gemini_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Read from `GEMINI_API_KEY`
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash-lite".to_string()
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_max_output_tokens() -> u32 {
    10000
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_base: default_gemini_api_base(),
            max_output_tokens: default_gemini_max_output_tokens(),
            api_key: None,
        }
    }
}

/// Agent behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Agent mode: "standard" or "reasoning"
    #[serde(default = "default_agent_mode")]
    pub mode: String,

    /// Maximum tool calls dispatched for a single external input
    #[serde(default = "default_max_tool_iterations")]
    pub max_tool_iterations: usize,

    /// Reasoning pass settings
    #[serde(default)]
    pub reasoning: ReasoningConfig,

    /// Tool settings
    #[serde(default)]
    pub tools: ToolsConfig,
}

fn default_agent_mode() -> String {
    "standard".to_string()
}

fn default_max_tool_iterations() -> usize {
    25
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            mode: default_agent_mode(),
            max_tool_iterations: default_max_tool_iterations(),
            reasoning: ReasoningConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

impl AgentConfig {
    /// Parsed agent mode
    pub fn agent_mode(&self) -> Result<AgentMode> {
        AgentMode::parse_str(&self.mode).map_err(|e| ThinkloopError::Config(e).into())
    }
}

/// Reasoning trace presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningConfig {
    /// Prefix the displayed trace with the time it was produced
    #[serde(default = "default_true")]
    pub show_timestamp: bool,

    /// Highlight the section headers of the reasoning structure
    #[serde(default = "default_true")]
    pub highlight_sections: bool,

    /// Record non-empty traces in the history as system messages
    #[serde(default = "default_true")]
    pub inject_into_history: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            show_timestamp: true,
            highlight_sections: true,
            inject_into_history: true,
        }
    }
}

/// Tool execution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Tool output larger than this is truncated before it reaches the model
    #[serde(default = "default_max_output")]
    pub max_output_size: usize,

    /// Largest file read_file will load and write_file will write
    #[serde(default = "default_max_file_read")]
    pub max_file_read_size: usize,
}

fn default_max_output() -> usize {
    1024 * 1024
}

fn default_max_file_read() -> usize {
    10 * 1024 * 1024
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            max_output_size: default_max_output(),
            max_file_read_size: default_max_file_read(),
        }
    }
}

impl Config {
    /// Load configuration from file, environment and CLI
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &str, cli: &Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(ThinkloopError::Io)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ThinkloopError::Yaml)?;
        tracing::debug!("Loaded configuration from {}", path);
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("THINKLOOP_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(model) = std::env::var("THINKLOOP_MODEL") {
            self.provider.model = Some(model);
        }

        if let Ok(mode) = std::env::var("THINKLOOP_AGENT_MODE") {
            self.agent.mode = mode;
        }

        if let Ok(max) = std::env::var("THINKLOOP_MAX_TOOL_ITERATIONS") {
            if let Ok(value) = max.parse() {
                self.agent.max_tool_iterations = value;
            } else {
                tracing::warn!("Invalid THINKLOOP_MAX_TOOL_ITERATIONS: {}", max);
            }
        }

        self.provider.openai.api_key = non_empty_env("OPENAI_API_KEY");
        self.provider.openrouter.api_key = non_empty_env("OPENROUTER_API_KEY");
        self.provider.gemini.api_key = non_empty_env("GEMINI_API_KEY");
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        let (provider, model, agent) = match &cli.command {
            Commands::Chat {
                provider,
                model,
                agent,
            }
            | Commands::Run {
                provider,
                model,
                agent,
                ..
            } => (provider, model, agent),
            Commands::Tools => return,
        };

        if let Some(provider) = provider {
            self.provider.provider_type = provider.clone();
        }
        if let Some(model) = model {
            self.provider.model = Some(model.clone());
        }
        if let Some(agent) = agent {
            self.agent.mode = agent.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ThinkloopError::Config` describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        let provider_type = self.provider.provider_type.to_lowercase();
        if !PROVIDER_TYPES.contains(&provider_type.as_str()) {
            return Err(ThinkloopError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                PROVIDER_TYPES.join(", ")
            ))
            .into());
        }

        self.agent.agent_mode()?;

        if self.agent.max_tool_iterations == 0 {
            return Err(ThinkloopError::Config(
                "max_tool_iterations must be greater than 0".to_string(),
            )
            .into());
        }

        if self.agent.max_tool_iterations > 1000 {
            return Err(ThinkloopError::Config(
                "max_tool_iterations must be less than or equal to 1000".to_string(),
            )
            .into());
        }

        if self.provider.request_timeout_seconds == 0 {
            return Err(ThinkloopError::Config(
                "request_timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.agent.tools.max_output_size == 0 {
            return Err(ThinkloopError::Config(
                "tools.max_output_size must be greater than 0".to_string(),
            )
            .into());
        }

        if self.agent.tools.max_file_read_size == 0 {
            return Err(ThinkloopError::Config(
                "tools.max_file_read_size must be greater than 0".to_string(),
            )
            .into());
        }

        Ok(())
    }

    /// Backend to use, resolving `auto` from the available API keys
    ///
    /// Auto-detection prefers OpenRouter, then Gemini, then OpenAI.
    ///
    /// # Errors
    ///
    /// Returns `ThinkloopError::MissingCredentials` when the selected backend
    /// (or, for `auto`, every backend) has no API key.
    pub fn resolve_provider_type(&self) -> Result<String> {
        let requested = self.provider.provider_type.to_lowercase();
        let has_key = |name: &str| match name {
            "openai" => self.provider.openai.api_key.is_some(),
            "openrouter" => self.provider.openrouter.api_key.is_some(),
            "gemini" => self.provider.gemini.api_key.is_some(),
            _ => false,
        };

        if requested == "auto" {
            return ["openrouter", "gemini", "openai"]
                .into_iter()
                .find(|&name| has_key(name))
                .map(str::to_string)
                .ok_or_else(|| {
                    ThinkloopError::MissingCredentials(
                        "set OPENROUTER_API_KEY, GEMINI_API_KEY or OPENAI_API_KEY".to_string(),
                    )
                    .into()
                });
        }

        if has_key(&requested) {
            Ok(requested)
        } else {
            Err(ThinkloopError::MissingCredentials(format!(
                "{} (set {}_API_KEY)",
                requested,
                requested.to_uppercase()
            ))
            .into())
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
