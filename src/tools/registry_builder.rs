//! Builder for the built-in tool registry
//!
//! Registers the fixed set of built-in tools in a stable order:
//! list_files, read_file, write_file, create_directory,
//! ask_human_for_clarification, analyze_reasoning, review_decision.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ToolsConfig;
use crate::console::{Console, TerminalConsole};
use crate::error::Result;
use crate::tools::ask_human::{self, AnswerReader, AskHumanTool};
use crate::tools::{
    create_directory, list_files, read_file, reasoning_tools, write_file, AnalyzeReasoningTool,
    Capability, CreateDirectoryTool, ListFilesTool, ReadFileTool, ReviewDecisionTool,
    ToolExecutor, ToolRegistry, WriteFileTool,
};

/// Builder for a session's tool registry
///
/// # Examples
///
/// ```
/// use thinkloop::tools::registry_builder::ToolRegistryBuilder;
/// use thinkloop::console::NullConsole;
/// use std::path::PathBuf;
/// use std::sync::Arc;
///
/// let registry = ToolRegistryBuilder::new(PathBuf::from("."))
///     .with_console(Arc::new(NullConsole))
///     .build()
///     .unwrap();
/// assert_eq!(registry.names()[0], "list_files");
/// assert_eq!(registry.len(), 7);
/// ```
pub struct ToolRegistryBuilder {
    working_dir: PathBuf,
    tools_config: ToolsConfig,
    console: Arc<dyn Console>,
    answers: Option<AnswerReader>,
    extra: Vec<(String, String, Arc<dyn ToolExecutor>)>,
}

impl ToolRegistryBuilder {
    /// Create a builder for tools confined to `working_dir`
    pub fn new(working_dir: PathBuf) -> Self {
        Self {
            working_dir,
            tools_config: ToolsConfig::default(),
            console: Arc::new(TerminalConsole::new()),
            answers: None,
            extra: Vec::new(),
        }
    }

    /// Set the tools configuration
    pub fn with_tools_config(mut self, config: ToolsConfig) -> Self {
        self.tools_config = config;
        self
    }

    /// Console the clarification tool prints its questions on
    pub fn with_console(mut self, console: Arc<dyn Console>) -> Self {
        self.console = console;
        self
    }

    /// Line source for clarification answers (defaults to stdin)
    pub fn with_answer_reader(mut self, answers: AnswerReader) -> Self {
        self.answers = Some(answers);
        self
    }

    /// Append a custom tool after the built-in ones
    pub fn with_custom_tool(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        executor: Arc<dyn ToolExecutor>,
    ) -> Self {
        self.extra.push((name.into(), description.into(), executor));
        self
    }

    /// Build the registry
    ///
    /// # Errors
    ///
    /// Returns an error if a custom tool name collides with a built-in one
    /// or is not a valid protocol identifier.
    pub fn build(self) -> Result<ToolRegistry> {
        let max_read = self.tools_config.max_file_read_size as u64;
        let clarifier = match self.answers {
            Some(answers) => AskHumanTool::new(Arc::clone(&self.console), answers),
            None => AskHumanTool::stdin(Arc::clone(&self.console)),
        };

        let mut registry = ToolRegistry::new();
        registry.register(
            list_files::NAME,
            list_files::DESCRIPTION,
            Capability::ListFiles(ListFilesTool::new(self.working_dir.clone())),
        )?;
        registry.register(
            read_file::NAME,
            read_file::DESCRIPTION,
            Capability::ReadFile(ReadFileTool::new(self.working_dir.clone(), max_read)),
        )?;
        registry.register(
            write_file::NAME,
            write_file::DESCRIPTION,
            Capability::WriteFile(WriteFileTool::new(self.working_dir.clone(), max_read)),
        )?;
        registry.register(
            create_directory::NAME,
            create_directory::DESCRIPTION,
            Capability::CreateDirectory(CreateDirectoryTool::new(self.working_dir.clone())),
        )?;
        registry.register(
            ask_human::NAME,
            ask_human::DESCRIPTION,
            Capability::AskHuman(clarifier),
        )?;
        registry.register(
            reasoning_tools::ANALYZE_NAME,
            reasoning_tools::ANALYZE_DESCRIPTION,
            Capability::AnalyzeReasoning(AnalyzeReasoningTool::new()),
        )?;
        registry.register(
            reasoning_tools::REVIEW_NAME,
            reasoning_tools::REVIEW_DESCRIPTION,
            Capability::ReviewDecision(ReviewDecisionTool::new()),
        )?;

        for (name, description, executor) in self.extra {
            registry.register(name, description, Capability::Custom(executor))?;
        }

        tracing::debug!(tools = ?registry.names(), "built tool registry");
        Ok(registry)
    }
}
