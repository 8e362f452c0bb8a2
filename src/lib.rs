//! Thinkloop - conversational agent library
//!
//! A session loop that lets a language model call local tools through a
//! plain-text protocol embedded in its replies.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `agent`: Conversation history, tool-call protocol, dispatcher, reasoning
//!   pass and the session loop
//! - `providers`: Model backend abstraction (OpenAI-compatible, Gemini)
//! - `tools`: Tool registry and the built-in file and clarification tools
//! - `prompts`: System prompt construction for both agent modes
//! - `config`: Configuration management and validation
//! - `console`: Operator-facing output
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use thinkloop::agent::ScriptedInput;
//! use thinkloop::commands::build_session;
//! use thinkloop::console::TerminalConsole;
//! use thinkloop::Config;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let mut session = build_session(&config, Arc::new(TerminalConsole::new()))?;
//!     session.run(&mut ScriptedInput::new(["list files"])).await?;
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod agent_mode;
pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod prompts;
pub mod providers;
pub mod tools;

pub use agent::{Conversation, Session, TurnOutcome};
pub use agent_mode::AgentMode;
pub use config::Config;
pub use error::{Result, ThinkloopError};

#[cfg(test)]
pub mod test_utils;
