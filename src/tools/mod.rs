//! Tools module for Thinkloop
//!
//! Tools are the capabilities a model can invoke through the
//! `TOOL_CALL: name({...})` protocol. Each tool receives the raw argument
//! payload captured from the reply and returns text, or a [`ToolError`]
//! whose message is fed back to the model.
//!
//! The set of built-in capabilities is closed ([`Capability`]); anything else
//! enters through [`Capability::Custom`]. The [`ToolRegistry`] maps names to
//! capabilities and keeps registration order so the rendered system prompt
//! is reproducible.

pub mod ask_human;
pub mod create_directory;
pub mod file_utils;
pub mod list_files;
pub mod read_file;
pub mod reasoning_tools;
pub mod registry_builder;
pub mod write_file;

use crate::error::{Result, ThinkloopError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

pub use ask_human::AskHumanTool;
pub use create_directory::CreateDirectoryTool;
pub use list_files::ListFilesTool;
pub use read_file::ReadFileTool;
pub use reasoning_tools::{AnalyzeReasoningTool, ReviewDecisionTool};
pub use registry_builder::ToolRegistryBuilder;
pub use write_file::WriteFileTool;

/// Failure of a single tool execution
///
/// The `Display` text becomes the body of the `TOOL_ERROR:` message the
/// model sees, so variants read as plain sentences.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The payload was not a JSON object of the expected shape
    #[error("invalid JSON for arguments: {0}")]
    InvalidJson(String),

    /// The payload parsed but a field was missing or unusable
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Path rejected by the working-directory validator
    #[error("{0}")]
    Path(#[from] file_utils::FileUtilsError),

    /// Filesystem failure
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// The human could not be asked or did not answer
    #[error("failed to get an answer from the human: {0}")]
    Interaction(String),

    /// Failure reported by a custom tool
    #[error("{0}")]
    Failed(String),
}

/// Name and description of a registered tool, as rendered in prompts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    /// Unique tool name
    pub name: String,
    /// Description shown to the model
    pub description: String,
}

impl ToolDescriptor {
    /// Create a new descriptor
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Execution logic for a tool outside the built-in set
///
/// # Examples
///
/// ```
/// use thinkloop::tools::{ToolError, ToolExecutor};
/// use async_trait::async_trait;
///
/// struct Shout;
///
/// #[async_trait]
/// impl ToolExecutor for Shout {
///     async fn execute(&self, raw_args: &str) -> Result<String, ToolError> {
///         Ok(raw_args.to_uppercase())
///     }
/// }
/// ```
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Run the tool with the raw argument payload captured from the reply
    async fn execute(&self, raw_args: &str) -> std::result::Result<String, ToolError>;
}

/// Closed set of capabilities a registry entry can hold
pub enum Capability {
    /// Read a file below the working directory
    ReadFile(ReadFileTool),
    /// Write a file below the working directory
    WriteFile(WriteFileTool),
    /// Recursively list a directory
    ListFiles(ListFilesTool),
    /// Create a directory and its parents
    CreateDirectory(CreateDirectoryTool),
    /// Ask the human operator a question
    AskHuman(AskHumanTool),
    /// Structured self-review of an approach
    AnalyzeReasoning(AnalyzeReasoningTool),
    /// Critical review of a decision
    ReviewDecision(ReviewDecisionTool),
    /// Any other executor
    Custom(Arc<dyn ToolExecutor>),
}

impl Capability {
    /// Execute the capability with a raw argument payload
    pub async fn execute(&self, raw_args: &str) -> std::result::Result<String, ToolError> {
        match self {
            Capability::ReadFile(tool) => tool.execute(raw_args).await,
            Capability::WriteFile(tool) => tool.execute(raw_args).await,
            Capability::ListFiles(tool) => tool.execute(raw_args).await,
            Capability::CreateDirectory(tool) => tool.execute(raw_args).await,
            Capability::AskHuman(tool) => tool.execute(raw_args).await,
            Capability::AnalyzeReasoning(tool) => tool.execute(raw_args),
            Capability::ReviewDecision(tool) => tool.execute(raw_args),
            Capability::Custom(executor) => executor.execute(raw_args).await,
        }
    }
}

impl std::fmt::Debug for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Capability::ReadFile(_) => "ReadFile",
            Capability::WriteFile(_) => "WriteFile",
            Capability::ListFiles(_) => "ListFiles",
            Capability::CreateDirectory(_) => "CreateDirectory",
            Capability::AskHuman(_) => "AskHuman",
            Capability::AnalyzeReasoning(_) => "AnalyzeReasoning",
            Capability::ReviewDecision(_) => "ReviewDecision",
            Capability::Custom(_) => "Custom",
        };
        f.write_str(kind)
    }
}

/// A named capability held by the registry
#[derive(Debug)]
pub struct RegisteredTool {
    descriptor: ToolDescriptor,
    capability: Capability,
}

impl RegisteredTool {
    /// Tool name
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Tool description
    pub fn description(&self) -> &str {
        &self.descriptor.description
    }

    /// Name and description pair
    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    /// Run the underlying capability
    pub async fn execute(&self, raw_args: &str) -> std::result::Result<String, ToolError> {
        self.capability.execute(raw_args).await
    }
}

/// Ordered mapping from tool name to capability
///
/// Lookups go through a name index; iteration follows registration order.
///
/// # Examples
///
/// ```
/// use thinkloop::tools::{Capability, ToolRegistry, ReviewDecisionTool};
///
/// let mut registry = ToolRegistry::new();
/// registry
///     .register("review_decision", "Review a decision", Capability::ReviewDecision(ReviewDecisionTool::new()))
///     .unwrap();
/// assert!(registry.get("review_decision").is_some());
/// assert_eq!(registry.names(), vec!["review_decision"]);
/// ```
#[derive(Debug, Default)]
pub struct ToolRegistry {
    entries: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability under a unique name
    ///
    /// # Errors
    ///
    /// Returns `ThinkloopError::Tool` if the name is empty, contains
    /// characters the call protocol cannot express, or is already taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        capability: Capability,
    ) -> Result<()> {
        let name = name.into();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ThinkloopError::Tool(format!("Invalid tool name: '{}'", name)).into());
        }
        if self.index.contains_key(&name) {
            return Err(
                ThinkloopError::Tool(format!("Tool '{}' is already registered", name)).into(),
            );
        }

        self.index.insert(name.clone(), self.entries.len());
        self.entries.push(RegisteredTool {
            descriptor: ToolDescriptor::new(name, description),
            capability,
        });
        Ok(())
    }

    /// Look up a tool by exact name
    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Registered tools in registration order
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredTool> {
        self.entries.iter()
    }

    /// Descriptors in registration order
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.entries.iter().map(|t| t.descriptor.clone()).collect()
    }

    /// Names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|t| t.name()).collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no tools are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Deserialize a raw argument payload into typed parameters
///
/// A blank payload is read as `{}` so zero-argument tools accept both
/// `name({})` and `name()`.
pub(crate) fn parse_args<T: DeserializeOwned>(raw_args: &str) -> std::result::Result<T, ToolError> {
    let trimmed = raw_args.trim();
    let payload = if trimmed.is_empty() { "{}" } else { trimmed };
    serde_json::from_str(payload).map_err(|e| ToolError::InvalidJson(e.to_string()))
}

/// Truncate tool output to at most `max_size` bytes on a char boundary
///
/// # Examples
///
/// ```
/// use thinkloop::tools::truncate_output;
///
/// assert_eq!(truncate_output("short", 100), "short");
/// assert!(truncate_output("0123456789", 4).starts_with("0123"));
/// assert!(truncate_output("0123456789", 4).ends_with("(truncated)"));
/// ```
pub fn truncate_output(output: &str, max_size: usize) -> String {
    if output.len() <= max_size {
        return output.to_string();
    }
    let mut end = max_size;
    while end > 0 && !output.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}\n... (truncated)", &output[..end])
}
