//! Line-editor input source for interactive chat
//!
//! Lines are read with `rustyline`. Special commands are answered here and
//! never reach the session; everything else is handed out as the next
//! input. Ctrl-C, Ctrl-D and `/exit` exhaust the source.

use crate::agent::{InputSource, SessionStatus};
use crate::agent_mode::AgentMode;
use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
use crate::console::Console;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;

/// What a typed line turned into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    /// Forward to the session
    Submit(String),
    /// Handled locally; read another line
    Handled,
    /// End the chat
    Exit,
}

/// Special-command state shared by every line of a chat
pub struct ChatCommands {
    console: Arc<dyn Console>,
    status: Option<SessionStatus>,
    pending_mode: Option<AgentMode>,
}

impl ChatCommands {
    /// Create command handling that reports on `console`
    pub fn new(console: Arc<dyn Console>) -> Self {
        Self {
            console,
            status: None,
            pending_mode: None,
        }
    }

    /// Mode the next input will run in
    pub fn effective_mode(&self) -> AgentMode {
        self.pending_mode
            .or_else(|| self.status.as_ref().map(|s| s.mode))
            .unwrap_or_default()
    }

    /// Record the session state reported between turns
    pub fn observe(&mut self, status: &SessionStatus) {
        self.status = Some(status.clone());
    }

    /// Take the mode switch requested since the last input
    pub fn take_mode_switch(&mut self) -> Option<AgentMode> {
        self.pending_mode.take()
    }

    /// Classify one typed line, running any special command it names
    pub fn handle_line(&mut self, line: &str) -> LineAction {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return LineAction::Handled;
        }

        match parse_special_command(trimmed) {
            Ok(SpecialCommand::None) => LineAction::Submit(trimmed.to_string()),
            Ok(SpecialCommand::Exit) => LineAction::Exit,
            Ok(SpecialCommand::Help) => {
                print_help();
                LineAction::Handled
            }
            Ok(SpecialCommand::ShowStatus) => {
                if let Some(status) = &self.status {
                    print!("{}", render_status(status, self.effective_mode()));
                }
                LineAction::Handled
            }
            Ok(SpecialCommand::SwitchMode(mode)) => {
                self.switch_mode(mode);
                LineAction::Handled
            }
            Err(e) => {
                self.console.print_error(&e.to_string());
                LineAction::Handled
            }
        }
    }

    fn switch_mode(&mut self, mode: AgentMode) {
        let current = self.effective_mode();
        if current == mode {
            println!("Already in {} mode\n", mode);
            return;
        }
        self.pending_mode = Some(mode);
        println!("Switched from {} to {} mode\n", current, mode);
    }
}

/// Render the `/status` block for `status`, showing `mode` as the mode
pub fn render_status(status: &SessionStatus, mode: AgentMode) -> String {
    let mut out = String::new();
    out.push_str("\n╔══════════════════════════════════════════════════════════════╗\n");
    out.push_str("║                    Thinkloop Session Status                  ║\n");
    out.push_str("╚══════════════════════════════════════════════════════════════╝\n\n");
    out.push_str(&format!(
        "Agent Mode:        {} ({})\n",
        mode.colored_tag(),
        mode.description()
    ));
    out.push_str(&format!("Provider:          {}\n", status.provider));
    out.push_str(&format!("Available Tools:   {}\n", status.tool_count));
    out.push_str(&format!(
        "Tool Call Budget:  {} per input\n",
        status.max_tool_iterations
    ));
    out.push_str(&format!(
        "Conversation Size: {} messages\n\n",
        status.message_count
    ));
    out
}

/// Interactive input source over a `rustyline` editor
pub struct ChatInput {
    editor: DefaultEditor,
    commands: ChatCommands,
}

impl ChatInput {
    /// Wrap `editor`, reporting command errors on `console`
    pub fn new(editor: DefaultEditor, console: Arc<dyn Console>) -> Self {
        Self {
            editor,
            commands: ChatCommands::new(console),
        }
    }
}

impl InputSource for ChatInput {
    fn next_input(&mut self) -> Option<String> {
        loop {
            let prompt = self
                .commands
                .console
                .prompt_marker(self.commands.effective_mode());
            match self.editor.readline(&prompt) {
                Ok(line) => match self.commands.handle_line(&line) {
                    LineAction::Submit(text) => {
                        if let Err(e) = self.editor.add_history_entry(text.as_str()) {
                            tracing::warn!("Failed to record history entry: {}", e);
                        }
                        return Some(text);
                    }
                    LineAction::Handled => continue,
                    LineAction::Exit => return None,
                },
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    return None;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    return None;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    return None;
                }
            }
        }
    }

    fn observe(&mut self, status: &SessionStatus) {
        self.commands.observe(status);
    }

    fn take_mode_switch(&mut self) -> Option<AgentMode> {
        self.commands.take_mode_switch()
    }
}
