//! System prompts for the agent modes
//!
//! Both prompts are a fixed template followed by one entry per registered
//! tool, in registry order. Building a prompt has no side effects.

pub mod reasoning_prompt;
pub mod standard_prompt;

use crate::agent_mode::AgentMode;
use crate::tools::ToolDescriptor;

/// Builds the system prompt for `mode` listing `tools`
///
/// # Examples
///
/// ```
/// use thinkloop::prompts::build_system_prompt;
/// use thinkloop::agent_mode::AgentMode;
/// use thinkloop::tools::ToolDescriptor;
///
/// let tools = vec![ToolDescriptor::new("read_file", "Reads a file")];
/// let prompt = build_system_prompt(AgentMode::Standard, &tools);
/// assert!(prompt.contains("TOOL_CALL:"));
/// assert!(prompt.contains("- Tool: read_file"));
/// ```
pub fn build_system_prompt(mode: AgentMode, tools: &[ToolDescriptor]) -> String {
    match mode {
        AgentMode::Standard => standard_prompt::generate_standard_prompt(tools),
        AgentMode::Reasoning => reasoning_prompt::generate_reasoning_prompt(tools),
    }
}

/// Render the tool entries, one `- Tool:` / `Description:` pair per tool
pub fn render_tool_list(tools: &[ToolDescriptor]) -> String {
    tools
        .iter()
        .map(|tool| format!("- Tool: {}\n  Description: {}\n", tool.name, tool.description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tools() -> Vec<ToolDescriptor> {
        vec![
            ToolDescriptor::new("write_file", "Writes"),
            ToolDescriptor::new("list_files", "Lists"),
        ]
    }

    #[test]
    fn test_tool_entries_follow_registry_order() {
        let prompt = build_system_prompt(AgentMode::Standard, &tools());
        let write_at = prompt.find("- Tool: write_file").unwrap();
        let list_at = prompt.find("- Tool: list_files").unwrap();
        assert!(write_at < list_at);
    }

    #[test]
    fn test_render_tool_list_format() {
        assert_eq!(
            render_tool_list(&tools()),
            "- Tool: write_file\n  Description: Writes\n- Tool: list_files\n  Description: Lists\n"
        );
    }

    #[test]
    fn test_empty_registry_renders_template_only() {
        assert_eq!(render_tool_list(&[]), "");
        let prompt = build_system_prompt(AgentMode::Reasoning, &[]);
        assert!(prompt.ends_with("Available tools:\n"));
    }

    #[test]
    fn test_modes_differ() {
        let standard = build_system_prompt(AgentMode::Standard, &tools());
        let reasoning = build_system_prompt(AgentMode::Reasoning, &tools());
        assert_ne!(standard, reasoning);
        assert!(reasoning.contains("<think>"));
        assert!(!standard.contains("<think>"));
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(
            build_system_prompt(AgentMode::Standard, &tools()),
            build_system_prompt(AgentMode::Standard, &tools())
        );
    }
}
