//! create_directory tool

use crate::tools::file_utils::PathValidator;
use crate::tools::{parse_args, ToolError};
use serde::Deserialize;
use std::path::PathBuf;

/// Registry name of the tool
pub const NAME: &str = "create_directory";

/// Description rendered into the system prompt
pub const DESCRIPTION: &str = r#"Creates a directory at the given path, including any missing parents. Requires a JSON object with the key "path". Example: {"path": "my/new/directory"}"#;

#[derive(Debug, Deserialize)]
struct CreateDirectoryParams {
    #[serde(default)]
    path: String,
}

/// Creates directories below the working directory
#[derive(Debug, Clone)]
pub struct CreateDirectoryTool {
    validator: PathValidator,
}

impl CreateDirectoryTool {
    /// Create the tool rooted at `working_dir`
    pub fn new(working_dir: PathBuf) -> Self {
        Self {
            validator: PathValidator::new(working_dir),
        }
    }

    /// Create the directory tree; succeeds if it already exists
    pub async fn execute(&self, raw_args: &str) -> Result<String, ToolError> {
        let params: CreateDirectoryParams = parse_args(raw_args)?;
        if params.path.is_empty() {
            return Err(ToolError::InvalidArguments(
                "'path' is required".to_string(),
            ));
        }

        let path = self.validator.resolve(&params.path)?;
        if path.is_file() {
            return Err(ToolError::InvalidArguments(format!(
                "'{}' already exists as a file",
                params.path
            )));
        }

        tokio::fs::create_dir_all(&path).await?;
        tracing::info!(path = %params.path, "created directory");
        Ok(format!("Directory '{}' created successfully.", params.path))
    }
}
