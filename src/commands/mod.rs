/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three top-level command modules:

- `chat`: Interactive chat session
- `run`: A session fed a single prompt
- `tools`: Listing of the registered tools

The handlers only wire library components together: configuration, the
provider, the tool registry and the session.
*/

use crate::agent::Session;
use crate::config::Config;
use crate::console::Console;
use crate::error::Result;
use crate::providers::create_provider;
use crate::tools::registry_builder::ToolRegistryBuilder;
use crate::tools::ToolRegistry;
use std::sync::Arc;

// Line-editor input source for chat
pub mod chat_input;
// Special commands parser for the chat loop
pub mod special_commands;

/// Build the tool registry for the current working directory
///
/// # Errors
///
/// Returns an error if the working directory cannot be determined.
pub fn build_registry(config: &Config, console: Arc<dyn Console>) -> Result<ToolRegistry> {
    let working_dir = std::env::current_dir()?;
    ToolRegistryBuilder::new(working_dir)
        .with_tools_config(config.agent.tools.clone())
        .with_console(console)
        .build()
}

/// Build a session from configuration
///
/// # Errors
///
/// Returns an error if no provider credentials are available or the agent
/// configuration is invalid.
pub fn build_session(config: &Config, console: Arc<dyn Console>) -> Result<Session> {
    let registry = build_registry(config, console.clone())?;
    let provider = create_provider(config)?;
    Session::new_boxed(provider, registry, config.agent.clone(), console)
}

// Chat command handler
pub mod chat {
    //! Interactive chat handler.
    //!
    //! Builds a session and drives it with a [`ChatInput`] until the
    //! operator exits.

    use super::*;
    use crate::commands::chat_input::ChatInput;
    use crate::console::TerminalConsole;
    use crate::error::ThinkloopError;
    use colored::Colorize;
    use rustyline::DefaultEditor;

    /// Start interactive chat
    ///
    /// Ends on `/exit`, Ctrl-C or Ctrl-D.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be built or the line editor
    /// cannot be initialized.
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive chat");

        let console: Arc<dyn Console> = Arc::new(TerminalConsole::new());
        let mut session = build_session(&config, console.clone())?;
        let editor = DefaultEditor::new().map_err(ThinkloopError::from)?;
        let mut input = ChatInput::new(editor, console);

        print_welcome_banner(&session);
        session.run(&mut input).await?;

        tracing::info!(
            "Chat ended after {} messages",
            session.conversation().len()
        );
        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome_banner(session: &Session) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                 Thinkloop Interactive Chat                   ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!(
            "Mode:     {} ({})",
            session.mode().colored_tag(),
            session.mode().description()
        );
        println!("Provider: {}", session.provider_name().green());
        println!("Tools:    {}\n", session.registry().names().join(", "));
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }
}

// Run command handler
pub mod r#run {
    //! One-shot handler: a session fed exactly one input.

    use super::*;
    use crate::agent::ScriptedInput;
    use crate::console::TerminalConsole;

    /// Send `prompt` to a fresh session and return once it is answered
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be built. Turn failures are
    /// reported on the console and do not fail the command.
    pub async fn run_prompt(config: Config, prompt: String) -> Result<()> {
        tracing::info!("Running single prompt");

        let console: Arc<dyn Console> = Arc::new(TerminalConsole::new());
        let mut session = build_session(&config, console)?;
        let mut input = ScriptedInput::new([prompt]);
        session.run(&mut input).await
    }
}

// Tools command handler
pub mod tools {
    //! Lists the tools a session would register.

    use super::*;
    use crate::console::TerminalConsole;
    use colored::Colorize;

    /// Print every registered tool in registration order
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be built.
    pub fn list_tools(config: &Config) -> Result<()> {
        let registry = build_registry(config, Arc::new(TerminalConsole::new()))?;
        println!("{}", "Available tools:".bold());
        print!("{}", render_tool_listing(&registry));
        Ok(())
    }

    /// Render one `name: description` block per tool
    pub fn render_tool_listing(registry: &ToolRegistry) -> String {
        registry
            .iter()
            .map(|tool| format!("  {}\n      {}\n", tool.name(), tool.description()))
            .collect()
    }

}
