//! Standard mode system prompt
//!
//! Teaches the model the `TOOL_CALL:` format and lists the available tools.

use crate::tools::ToolDescriptor;

use super::render_tool_list;

/// Instructions placed before the tool list
pub const STANDARD_PREAMBLE: &str = r#"You are Thinkloop, an assistant that can use tools to interact with the user's system.
To use a tool you MUST reply EXACTLY in the following format: TOOL_CALL: ToolName({"arg_name": "value", "another_arg": "value"})
IMPORTANT: the tool arguments MUST be a valid JSON object.
If a tool takes no arguments, use an empty JSON object: TOOL_CALL: ToolName({})
CAUTION: only use the ask_human_for_clarification tool when it is necessary to resolve doubts about critical actions.
The available tools are listed below with their descriptions:
"#;

/// Instructions placed after the tool list
pub const STANDARD_TRAILER: &str = "After a tool is called, I will provide the result, and then you should answer the user's original question based on that result. If you can answer directly without tools, do so.";

/// Generates the standard system prompt for `tools`
///
/// # Examples
///
/// ```
/// use thinkloop::prompts::standard_prompt::generate_standard_prompt;
/// use thinkloop::tools::ToolDescriptor;
///
/// let prompt = generate_standard_prompt(&[ToolDescriptor::new("list_files", "Lists files")]);
/// assert!(prompt.contains("- Tool: list_files\n  Description: Lists files\n"));
/// ```
pub fn generate_standard_prompt(tools: &[ToolDescriptor]) -> String {
    let mut prompt = String::from(STANDARD_PREAMBLE);
    prompt.push_str(&render_tool_list(tools));
    prompt.push('\n');
    prompt.push_str(STANDARD_TRAILER);
    prompt
}
