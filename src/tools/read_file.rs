//! read_file tool

use crate::tools::file_utils::{self, PathValidator};
use crate::tools::{parse_args, ToolError};
use serde::Deserialize;
use std::path::PathBuf;

/// Registry name of the tool
pub const NAME: &str = "read_file";

/// Description rendered into the system prompt
pub const DESCRIPTION: &str = r#"Reads the contents of a file. Requires a JSON object with the key "path". Example: {"path": "docs/notes.txt"}"#;

#[derive(Debug, Deserialize)]
struct ReadFileParams {
    #[serde(default)]
    path: String,
}

/// Reads a UTF-8 file below the working directory
///
/// # Examples
///
/// ```
/// use thinkloop::tools::ReadFileTool;
/// use std::path::PathBuf;
///
/// let tool = ReadFileTool::new(PathBuf::from("/project"), 10 * 1024 * 1024);
/// # tokio_test::block_on(async {
/// let err = tool.execute(r#"{"path": ""}"#).await.unwrap_err();
/// assert!(err.to_string().contains("required"));
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct ReadFileTool {
    validator: PathValidator,
    max_file_size: u64,
}

impl ReadFileTool {
    /// Create the tool rooted at `working_dir`, refusing files above `max_file_size` bytes
    pub fn new(working_dir: PathBuf, max_file_size: u64) -> Self {
        Self {
            validator: PathValidator::new(working_dir),
            max_file_size,
        }
    }

    /// Return the file contents
    pub async fn execute(&self, raw_args: &str) -> Result<String, ToolError> {
        let params: ReadFileParams = parse_args(raw_args)?;
        if params.path.is_empty() {
            return Err(ToolError::InvalidArguments(
                "'path' is required".to_string(),
            ));
        }

        let path = self.validator.resolve(&params.path)?;
        if path.is_dir() {
            return Err(ToolError::InvalidArguments(format!(
                "'{}' is a directory, not a file",
                params.path
            )));
        }

        file_utils::check_file_size(&path, self.max_file_size).await?;
        let content = tokio::fs::read_to_string(&path).await?;
        tracing::debug!(path = %params.path, bytes = content.len(), "read file");
        Ok(content)
    }
}
