//! Test utilities for Thinkloop
//!
//! Temporary directories, a provider that replays canned replies, and a
//! console that records what the operator would have seen.

use crate::console::Console;
use crate::error::{Result, ThinkloopError};
use crate::providers::{Message, Provider};
use crate::tools::ToolDescriptor;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Panics
///
/// Panics if the file cannot be written
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Provider that replays a fixed script of replies
///
/// `Err` entries are returned as provider errors. Once the script runs out
/// every call fails.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<std::result::Result<String, String>>>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedProvider {
    /// Provider that answers with `replies` in order
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_results(replies.into_iter().map(|r| Ok(r.into())))
    }

    /// Provider whose script may include failures
    pub fn with_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = std::result::Result<String, String>>,
    {
        Self {
            replies: Mutex::new(results.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every history this provider was called with
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate_response(
        &self,
        history: &[Message],
        _tools: &[ToolDescriptor],
    ) -> Result<String> {
        self.requests.lock().unwrap().push(history.to_vec());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(ThinkloopError::Provider(message).into()),
            None => Err(ThinkloopError::Provider("script exhausted".to_string()).into()),
        }
    }
}

/// Console that records every event as `(kind, text)`
#[derive(Debug, Default)]
pub struct RecordingConsole {
    events: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingConsole {
    /// Create an empty recording
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts recorded for one kind of event
    pub fn texts(&self, kind: &str) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, text)| text.clone())
            .collect()
    }

    fn record(&self, kind: &'static str, text: impl Into<String>) {
        self.events.lock().unwrap().push((kind, text.into()));
    }
}

impl Console for RecordingConsole {
    fn print_processing(&self) {
        self.record("processing", "");
    }

    fn print_tool_call(&self, tool_name: &str, arguments: &str) {
        self.record("tool_call", format!("{}({})", tool_name, arguments));
    }

    fn print_tool_result(&self, tool_name: &str, output: &str) {
        self.record("tool_result", format!("{}: {}", tool_name, output));
    }

    fn print_tool_error(&self, tool_name: &str, message: &str) {
        self.record("tool_error", format!("{}: {}", tool_name, message));
    }

    fn print_reasoning(&self, rendered: &str) {
        self.record("reasoning", rendered);
    }

    fn print_answer(&self, answer: &str) {
        self.record("answer", answer);
    }

    fn print_question(&self, question: &str) {
        self.record("question", question);
    }

    fn print_error(&self, message: &str) {
        self.record("error", message);
    }

    fn print_warning(&self, message: &str) {
        self.record("warning", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_file_in_subdirectory() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "nested/test.txt", "content");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "content");
    }

    #[tokio::test]
    async fn test_scripted_provider_replays_then_fails() {
        let provider = ScriptedProvider::with_results(vec![Ok("one".to_string()), Err("boom".to_string())]);
        assert_eq!(provider.generate_response(&[], &[]).await.unwrap(), "one");
        assert!(provider.generate_response(&[], &[]).await.is_err());
        let exhausted = provider.generate_response(&[], &[]).await.unwrap_err();
        assert!(exhausted.to_string().contains("script exhausted"));
        assert_eq!(provider.call_count(), 3);
    }

    #[test]
    fn test_recording_console_filters_by_kind() {
        let console = RecordingConsole::new();
        console.print_answer("done");
        console.print_error("oops");
        assert_eq!(console.texts("answer"), vec!["done".to_string()]);
        assert_eq!(console.texts("error"), vec!["oops".to_string()]);
        assert!(console.texts("warning").is_empty());
    }
}
