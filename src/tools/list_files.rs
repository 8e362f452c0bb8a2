//! list_files tool
//!
//! Recursive listing rendered as a JSON array of paths relative to the
//! working directory.

use crate::tools::file_utils::PathValidator;
use crate::tools::{parse_args, ToolError};
use serde::Deserialize;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Registry name of the tool
pub const NAME: &str = "list_files";

/// Description rendered into the system prompt
pub const DESCRIPTION: &str = "Lists files and directories under a path, recursively. If no path is given, lists the current directory.";

#[derive(Debug, Default, Deserialize)]
struct ListFilesParams {
    #[serde(default)]
    path: Option<String>,
}

/// Lists directory trees below the working directory
#[derive(Debug, Clone)]
pub struct ListFilesTool {
    validator: PathValidator,
}

impl ListFilesTool {
    /// Create the tool rooted at `working_dir`
    pub fn new(working_dir: PathBuf) -> Self {
        Self {
            validator: PathValidator::new(working_dir),
        }
    }

    /// Walk the requested directory and return its entries as a JSON array
    pub async fn execute(&self, raw_args: &str) -> Result<String, ToolError> {
        let params: ListFilesParams = parse_args(raw_args)?;
        let requested = params
            .path
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| ".".to_string());

        let root = self.validator.resolve(&requested)?;
        if !root.is_dir() {
            return Err(ToolError::InvalidArguments(format!(
                "'{}' is not a directory",
                requested
            )));
        }

        let validator = self.validator.clone();
        let entries = tokio::task::spawn_blocking(move || {
            let mut entries = Vec::new();
            for entry in WalkDir::new(&root).min_depth(1).sort_by_file_name() {
                let entry = entry.map_err(|e| ToolError::Io(e.into()))?;
                entries.push(validator.relative_display(entry.path()));
            }
            Ok::<_, ToolError>(entries)
        })
        .await
        .map_err(|e| ToolError::Failed(format!("listing task failed: {}", e)))??;

        tracing::debug!(path = %requested, count = entries.len(), "listed files");
        serde_json::to_string(&entries).map_err(|e| ToolError::Failed(e.to_string()))
    }
}
