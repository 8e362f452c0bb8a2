//! Special commands parser for interactive chat
//!
//! Special commands are handled by the chat loop itself and never reach the
//! model. They start with `/` (plus the bare words `exit` and `quit`) and are
//! case-insensitive.

use crate::agent_mode::AgentMode;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Commands understood by the chat loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Switch between standard and reasoning mode
    SwitchMode(AgentMode),

    /// Show mode, provider, tool count and history length
    ShowStatus,

    /// Show the list of special commands
    Help,

    /// End the session
    Exit,

    /// Not a special command; send the input to the model
    None,
}

/// Parse a line of chat input
///
/// # Errors
///
/// Returns a [`CommandError`] for a `/`-prefixed input that is not a known
/// command or carries a bad argument.
///
/// # Examples
///
/// ```
/// use thinkloop::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/status").unwrap(), SpecialCommand::ShowStatus);
/// assert_eq!(parse_special_command("QUIT").unwrap(), SpecialCommand::Exit);
/// assert_eq!(parse_special_command("list files").unwrap(), SpecialCommand::None);
/// assert!(parse_special_command("/frobnicate").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    match lower.as_str() {
        "/status" => Ok(SpecialCommand::ShowStatus),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" | "exit" | "quit" => Ok(SpecialCommand::Exit),

        "/mode" => Err(CommandError::MissingArgument {
            command: "/mode".to_string(),
            usage: "/mode <standard|reasoning>".to_string(),
        }),
        input if input.starts_with("/mode ") => {
            let arg = input["/mode ".len()..].trim();
            AgentMode::parse_str(arg)
                .map(SpecialCommand::SwitchMode)
                .map_err(|_| CommandError::UnsupportedArgument {
                    command: "/mode".to_string(),
                    arg: arg.to_string(),
                })
        }
        "/reasoning" => Ok(SpecialCommand::SwitchMode(AgentMode::Reasoning)),
        "/standard" => Ok(SpecialCommand::SwitchMode(AgentMode::Standard)),

        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print the special command reference
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat
=====================================

AGENT MODE:
  /mode standard   - Answer directly, calling tools when needed
  /mode reasoning  - Deliberate in <think> blocks before each answer
  /standard        - Shorthand for /mode standard
  /reasoning       - Shorthand for /mode reasoning

SESSION INFORMATION:
  /status          - Show mode, provider, tools and history length
  /help            - Show this help message

EXIT:
  /exit, exit, quit - End the session (Ctrl-D also works)

Anything else is sent to the model.
"#
    );
}
