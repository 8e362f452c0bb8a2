//! Tool-call dispatch
//!
//! Resolves a parsed call against the registry, runs it, and folds the
//! outcome back into the conversation. Dispatch never fails: every outcome
//! becomes exactly one `TOOL_RESULT:` or `TOOL_ERROR:` user message after
//! the assistant reply that requested it.

use crate::agent::conversation::Conversation;
use crate::agent::protocol::{
    format_tool_error, format_tool_not_found, format_tool_result, ToolCallExpression,
};
use crate::console::Console;
use crate::tools::{truncate_output, ToolRegistry};

/// Result of dispatching one tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No tool with the requested name is registered
    ToolMissing,
    /// The tool ran and reported an error
    ToolFailed(String),
    /// The tool ran and produced output
    ToolSucceeded(String),
}

/// Runs tool calls against a registry
pub struct Dispatcher<'a> {
    registry: &'a ToolRegistry,
    console: &'a dyn Console,
    max_output_size: usize,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher over `registry`, reporting to `console`
    pub fn new(registry: &'a ToolRegistry, console: &'a dyn Console, max_output_size: usize) -> Self {
        Self {
            registry,
            console,
            max_output_size,
        }
    }

    /// Execute `call` and record the exchange in `conversation`
    ///
    /// `reply` is the raw assistant text the call was parsed from; it is
    /// appended first, followed by the outcome message.
    pub async fn dispatch(
        &self,
        reply: &str,
        call: &ToolCallExpression,
        conversation: &mut Conversation,
    ) -> DispatchOutcome {
        conversation.add_assistant_message(reply);
        self.console
            .print_tool_call(&call.tool_name, &call.argument_payload);

        let Some(tool) = self.registry.get(&call.tool_name) else {
            tracing::warn!(tool = %call.tool_name, "model requested unknown tool");
            let message = format_tool_not_found(&call.tool_name);
            self.console.print_tool_error(&call.tool_name, "tool not found");
            conversation.add_user_message(message);
            return DispatchOutcome::ToolMissing;
        };

        tracing::debug!(tool = %call.tool_name, payload = %call.argument_payload, "executing tool");
        match tool.execute(&call.argument_payload).await {
            Ok(output) => {
                let output = truncate_output(&output, self.max_output_size);
                tracing::info!(tool = %call.tool_name, bytes = output.len(), "tool succeeded");
                self.console.print_tool_result(&call.tool_name, &output);
                conversation.add_user_message(format_tool_result(&output));
                DispatchOutcome::ToolSucceeded(output)
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(tool = %call.tool_name, error = %message, "tool failed");
                self.console.print_tool_error(&call.tool_name, &message);
                conversation.add_user_message(format_tool_error(&message));
                DispatchOutcome::ToolFailed(message)
            }
        }
    }
}
