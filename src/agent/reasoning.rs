//! Reasoning trace extraction
//!
//! In reasoning mode each external input is first sent to the model in a
//! one-off request primed with the reasoning prompt. The `<think>` blocks of
//! that reply form the trace; everything else in it is discarded.

use crate::agent_mode::AgentMode;
use crate::config::ReasoningConfig;
use crate::error::Result;
use crate::prompts::build_system_prompt;
use crate::prompts::reasoning_prompt::SECTION_HEADERS;
use crate::providers::{Message, Provider};
use crate::tools::ToolDescriptor;
use chrono::{DateTime, Local};
use colored::Colorize;

/// Opening delimiter of a deliberation block
pub const THINK_OPEN: &str = "<think>";

/// Closing delimiter of a deliberation block
pub const THINK_CLOSE: &str = "</think>";

/// Prefix of the system message that records a trace in the history
pub const TRACE_MESSAGE_PREFIX: &str = "Reasoning for solution:\n";

/// Extract and join every `<think>...</think>` block in `text`
///
/// Each block is trimmed; blocks are joined with a newline. An opening tag
/// without a matching close is ignored. Text with no blocks yields an empty
/// string.
///
/// # Examples
///
/// ```
/// use thinkloop::agent::reasoning::extract_think_blocks;
///
/// let reply = "<think> A </think> noise <think>\nB\n</think>";
/// assert_eq!(extract_think_blocks(reply), "A\nB");
/// assert_eq!(extract_think_blocks("no deliberation here"), "");
/// ```
pub fn extract_think_blocks(text: &str) -> String {
    let mut blocks = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(THINK_OPEN) {
        let after_open = &rest[open + THINK_OPEN.len()..];
        let Some(close) = after_open.find(THINK_CLOSE) else {
            break;
        };
        blocks.push(after_open[..close].trim());
        rest = &after_open[close + THINK_CLOSE.len()..];
    }

    blocks.join("\n")
}

/// Run the reasoning pass for `user_input`
///
/// Sends the reasoning system prompt, the prior history and the new input
/// to the model in a single call. The caller's history is not modified.
///
/// # Errors
///
/// Propagates provider errors unchanged.
pub async fn extract_trace(
    provider: &dyn Provider,
    user_input: &str,
    history: &[Message],
    tools: &[ToolDescriptor],
) -> Result<String> {
    let mut request = Vec::with_capacity(history.len() + 2);
    request.push(Message::system(build_system_prompt(AgentMode::Reasoning, tools)));
    request.extend_from_slice(history);
    request.push(Message::user(user_input));

    tracing::debug!("Requesting reasoning trace over {} messages", request.len());
    let reply = provider.generate_response(&request, tools).await?;
    let trace = extract_think_blocks(&reply);

    if trace.is_empty() {
        tracing::debug!("Reasoning reply contained no think blocks");
    } else {
        tracing::info!("Extracted reasoning trace: {} bytes", trace.len());
    }
    Ok(trace)
}

/// Emphasize the reasoning structure's section headers
pub fn highlight_sections(trace: &str) -> String {
    SECTION_HEADERS
        .iter()
        .fold(trace.to_string(), |acc, header| {
            acc.replace(header, &header.bold().bright_cyan().to_string())
        })
}

/// Render a trace for the operator according to `config`
///
/// Only affects display; the history always stores the plain trace.
pub fn format_trace_for_display(
    trace: &str,
    config: &ReasoningConfig,
    generated_at: DateTime<Local>,
) -> String {
    let body = if config.highlight_sections {
        highlight_sections(trace)
    } else {
        trace.to_string()
    };

    if config.show_timestamp {
        format!(
            "Reasoning generated at {}\n{}",
            generated_at.format("%H:%M:%S"),
            body
        )
    } else {
        body
    }
}
