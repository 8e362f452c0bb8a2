//! write_file tool
//!
//! Writes or overwrites a file, creating missing parent directories.

use crate::tools::file_utils::PathValidator;
use crate::tools::{parse_args, ToolError};
use serde::Deserialize;
use std::path::PathBuf;

/// Registry name of the tool
pub const NAME: &str = "write_file";

/// Description rendered into the system prompt
pub const DESCRIPTION: &str = r#"Writes the given content to a file, replacing it if it exists. Requires a JSON object with the keys "path" and "content". Example: {"path": "notes/todo.txt", "content": "Hello, world!"}"#;

#[derive(Debug, Deserialize)]
struct WriteFileParams {
    #[serde(default)]
    path: String,
    #[serde(default)]
    content: String,
}

/// Writes text files below the working directory
#[derive(Debug, Clone)]
pub struct WriteFileTool {
    validator: PathValidator,
    max_file_size: u64,
}

impl WriteFileTool {
    /// Create the tool rooted at `working_dir`, refusing content above `max_file_size` bytes
    pub fn new(working_dir: PathBuf, max_file_size: u64) -> Self {
        Self {
            validator: PathValidator::new(working_dir),
            max_file_size,
        }
    }

    /// Write the file and return a confirmation sentence
    pub async fn execute(&self, raw_args: &str) -> Result<String, ToolError> {
        let params: WriteFileParams = parse_args(raw_args)?;
        if params.path.is_empty() {
            return Err(ToolError::InvalidArguments(
                "'path' and 'content' are required".to_string(),
            ));
        }
        if params.content.len() as u64 > self.max_file_size {
            return Err(ToolError::InvalidArguments(format!(
                "content size {} bytes exceeds maximum {} bytes",
                params.content.len(),
                self.max_file_size
            )));
        }

        let path = self.validator.resolve(&params.path)?;
        if path.is_dir() {
            return Err(ToolError::InvalidArguments(format!(
                "'{}' is a directory, not a file",
                params.path
            )));
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, params.content.as_bytes()).await?;

        tracing::info!(path = %params.path, bytes = params.content.len(), "wrote file");
        Ok(format!("File '{}' written successfully.", params.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_writes_file_and_creates_parents() {
        let temp = TempDir::new().unwrap();
        let tool = WriteFileTool::new(temp.path().to_path_buf(), 1024);

        let out = tool
            .execute(r#"{"path": "a/b/c.txt", "content": "data"}"#)
            .await
            .unwrap();

        assert_eq!(out, "File 'a/b/c.txt' written successfully.");
        let written = std::fs::read_to_string(temp.path().join("a/b/c.txt")).unwrap();
        assert_eq!(written, "data");
    }

    #[tokio::test]
    async fn test_overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("f.txt"), "old").unwrap();
        let tool = WriteFileTool::new(temp.path().to_path_buf(), 1024);

        tool.execute(r#"{"path": "f.txt", "content": "new"}"#)
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(temp.path().join("f.txt")).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_empty_path_is_required_error() {
        let temp = TempDir::new().unwrap();
        let tool = WriteFileTool::new(temp.path().to_path_buf(), 1024);
        let err = tool
            .execute(r#"{"path": "", "content": "x"}"#)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid arguments: 'path' and 'content' are required"
        );
    }

    #[tokio::test]
    async fn test_empty_content_is_allowed() {
        let temp = TempDir::new().unwrap();
        let tool = WriteFileTool::new(temp.path().to_path_buf(), 1024);
        tool.execute(r#"{"path": "empty.txt"}"#).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(temp.path().join("empty.txt")).unwrap(),
            ""
        );
    }

    #[tokio::test]
    async fn test_rejects_oversized_content() {
        let temp = TempDir::new().unwrap();
        let tool = WriteFileTool::new(temp.path().to_path_buf(), 4);
        let err = tool
            .execute(r#"{"path": "f.txt", "content": "too long"}"#)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("exceeds maximum"));
        assert!(!temp.path().join("f.txt").exists());
    }

    #[tokio::test]
    async fn test_rejects_absolute_path() {
        let temp = TempDir::new().unwrap();
        let tool = WriteFileTool::new(temp.path().to_path_buf(), 1024);
        let err = tool
            .execute(r#"{"path": "/tmp/evil.txt", "content": "x"}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Path(_)));
    }
}
