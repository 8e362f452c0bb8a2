//! Path confinement and size checks shared by the filesystem tools
//!
//! Every path a model supplies is interpreted relative to the session's
//! working directory and must stay inside it.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Rejection reasons for model-supplied paths and files
#[derive(Error, Debug)]
pub enum FileUtilsError {
    /// Path uses `..` or `~` to leave the working directory
    #[error("path traversal not allowed: {0}")]
    PathTraversal(String),

    /// Path is absolute
    #[error("absolute paths are not allowed: {0}")]
    AbsolutePath(String),

    /// Path resolves (through symlinks) outside the working directory
    #[error("path escapes the working directory: {0}")]
    OutsideWorkingDir(String),

    /// File larger than the configured cap
    #[error("file size {0} bytes exceeds maximum {1} bytes")]
    FileTooLarge(u64, u64),

    /// Filesystem failure while resolving a path
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Resolves model-supplied relative paths against a working directory
///
/// # Examples
///
/// ```
/// use thinkloop::tools::file_utils::PathValidator;
///
/// let project = tempfile::tempdir().unwrap();
/// let validator = PathValidator::new(project.path().to_path_buf());
/// assert!(validator.resolve("src/main.rs").is_ok());
/// assert!(validator.resolve("../etc/passwd").is_err());
/// assert!(validator.resolve("/etc/passwd").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PathValidator {
    working_dir: PathBuf,
}

impl PathValidator {
    /// Create a validator rooted at `working_dir`
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// The directory all paths are confined to
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Resolve `target` to a path inside the working directory
    ///
    /// Existing targets are canonicalized so symlinks cannot escape; for a
    /// target that does not exist yet, its nearest existing ancestor is
    /// checked instead. The walk stops at the working directory, so a
    /// working directory that does not exist yet accepts any relative path.
    pub fn resolve(&self, target: &str) -> Result<PathBuf, FileUtilsError> {
        let path = Path::new(target);

        if path.is_absolute() {
            return Err(FileUtilsError::AbsolutePath(target.to_string()));
        }
        if target.starts_with('~') {
            return Err(FileUtilsError::PathTraversal(target.to_string()));
        }
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(FileUtilsError::PathTraversal(target.to_string()));
        }

        let full_path = self.working_dir.join(path);
        let root = self
            .working_dir
            .canonicalize()
            .unwrap_or_else(|_| self.working_dir.clone());

        let mut ancestor = full_path.as_path();
        while !ancestor.exists() {
            if ancestor == self.working_dir {
                return Ok(full_path);
            }
            match ancestor.parent() {
                Some(parent) => ancestor = parent,
                None => return Ok(full_path),
            }
        }

        let canonical = ancestor.canonicalize()?;
        if !canonical.starts_with(&root) {
            return Err(FileUtilsError::OutsideWorkingDir(target.to_string()));
        }

        if ancestor == full_path {
            Ok(canonical)
        } else {
            Ok(full_path)
        }
    }

    /// Render `path` relative to the working directory with `/` separators
    pub fn relative_display(&self, path: &Path) -> String {
        let root = self
            .working_dir
            .canonicalize()
            .unwrap_or_else(|_| self.working_dir.clone());
        let relative = path
            .strip_prefix(&root)
            .or_else(|_| path.strip_prefix(&self.working_dir))
            .unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Fail if the file at `path` is larger than `max_size` bytes
pub async fn check_file_size(path: &Path, max_size: u64) -> Result<u64, FileUtilsError> {
    let size = tokio::fs::metadata(path).await?.len();
    if size > max_size {
        return Err(FileUtilsError::FileTooLarge(size, max_size));
    }
    Ok(size)
}
