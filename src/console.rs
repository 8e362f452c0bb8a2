//! Operator-facing output
//!
//! The session loop never writes to stdout directly. Everything the operator
//! sees goes through a [`Console`], so the loop can run headless in tests and
//! the terminal rendering stays in one place.

use crate::agent_mode::AgentMode;
use colored::Colorize;

/// Output surface for the operator watching a session
pub trait Console: Send + Sync {
    /// Indicate that a model call is in flight
    fn print_processing(&self);

    /// Announce a tool invocation parsed from the model reply
    fn print_tool_call(&self, tool_name: &str, arguments: &str);

    /// Show a successful tool result
    fn print_tool_result(&self, tool_name: &str, output: &str);

    /// Show a tool failure (unknown tool or execution error)
    fn print_tool_error(&self, tool_name: &str, message: &str);

    /// Show an already formatted reasoning trace
    fn print_reasoning(&self, rendered: &str);

    /// Show the model's final answer for the current input
    fn print_answer(&self, answer: &str);

    /// Ask the human a question on behalf of the model
    fn print_question(&self, question: &str);

    /// Report a recoverable failure
    fn print_error(&self, message: &str);

    /// Report a condition worth attention that did not fail the turn
    fn print_warning(&self, message: &str);

    /// Marker shown where the operator types the next input
    fn prompt_marker(&self, mode: AgentMode) -> String {
        format!("[{}] >> ", mode)
    }
}

/// Colored terminal output on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConsole;

impl TerminalConsole {
    /// Create a terminal console
    pub fn new() -> Self {
        Self
    }
}

impl Console for TerminalConsole {
    fn prompt_marker(&self, mode: AgentMode) -> String {
        format!("{} >> ", mode.colored_tag())
    }

    fn print_processing(&self) {
        println!("{}", "Thinking...".dimmed());
    }

    fn print_tool_call(&self, tool_name: &str, arguments: &str) {
        println!(
            "{} {}({})",
            "Tool call:".cyan().bold(),
            tool_name.cyan(),
            arguments
        );
    }

    fn print_tool_result(&self, tool_name: &str, output: &str) {
        println!("{} {}", format!("[{}]", tool_name).green(), "completed".green());
        if !output.is_empty() {
            println!("{}", output.dimmed());
        }
    }

    fn print_tool_error(&self, tool_name: &str, message: &str) {
        println!("{} {}", format!("[{}]", tool_name).red(), message.red());
    }

    fn print_reasoning(&self, rendered: &str) {
        println!("{}", "Reasoning".magenta().bold());
        println!("{}", rendered);
        println!();
    }

    fn print_answer(&self, answer: &str) {
        println!("{} {}", "Agent:".yellow().bold(), answer);
        println!();
    }

    fn print_question(&self, question: &str) {
        println!("{} {}", "Agent asks:".yellow().bold(), question);
        println!("{}", "Your answer:".bold());
    }

    fn print_error(&self, message: &str) {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }

    fn print_warning(&self, message: &str) {
        eprintln!("{} {}", "Warning:".yellow().bold(), message);
    }
}

/// Console that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullConsole;

impl Console for NullConsole {
    fn print_processing(&self) {}
    fn print_tool_call(&self, _tool_name: &str, _arguments: &str) {}
    fn print_tool_result(&self, _tool_name: &str, _output: &str) {}
    fn print_tool_error(&self, _tool_name: &str, _message: &str) {}
    fn print_reasoning(&self, _rendered: &str) {}
    fn print_answer(&self, _answer: &str) {}
    fn print_question(&self, _question: &str) {}
    fn print_error(&self, _message: &str) {}
    fn print_warning(&self, _message: &str) {}
}
