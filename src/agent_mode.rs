//! Agent mode types
//!
//! Two modes exist:
//! - Standard: every input goes straight to the model
//! - Reasoning: every input is preceded by a private deliberation pass whose
//!   `<think>` blocks are shown to the operator and recorded in the history

use colored::Colorize;
use std::fmt;

/// Operating mode of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentMode {
    /// Plain request/parse/dispatch cycle
    #[default]
    Standard,

    /// Adds a reasoning pass before each external input
    Reasoning,
}

impl fmt::Display for AgentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "STANDARD"),
            Self::Reasoning => write!(f, "REASONING"),
        }
    }
}

impl AgentMode {
    /// Parse an agent mode from a string
    ///
    /// Accepts `standard` (alias `default`) and `reasoning`, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use thinkloop::agent_mode::AgentMode;
    ///
    /// assert_eq!(AgentMode::parse_str("reasoning").unwrap(), AgentMode::Reasoning);
    /// assert_eq!(AgentMode::parse_str("default").unwrap(), AgentMode::Standard);
    /// assert!(AgentMode::parse_str("turbo").is_err());
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "default" => Ok(Self::Standard),
            "reasoning" => Ok(Self::Reasoning),
            other => Err(format!("Unknown agent mode: {}", other)),
        }
    }

    /// Short description used by the chat banner and `/status`
    pub fn description(&self) -> &'static str {
        match self {
            Self::Standard => "Answers directly, calling tools when needed",
            Self::Reasoning => "Deliberates in <think> blocks before answering",
        }
    }

    /// Colored tag for terminal prompts
    pub fn colored_tag(&self) -> String {
        match self {
            Self::Standard => format!("[{}]", "STANDARD".cyan()),
            Self::Reasoning => format!("[{}]", "REASONING".purple()),
        }
    }
}
