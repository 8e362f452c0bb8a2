#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use thinkloop::config::AgentConfig;
use thinkloop::console::Console;
use thinkloop::error::ThinkloopError;
use thinkloop::providers::{Message, Provider};
use thinkloop::tools::ask_human::{answer_reader, LineAnswers};
use thinkloop::tools::registry_builder::ToolRegistryBuilder;
use thinkloop::tools::ToolDescriptor;
use thinkloop::Session;

pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Provider that replays canned replies and records every request
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedProvider {
    pub fn new(replies: &[&str]) -> Self {
        Self::with_results(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn with_results(results: Vec<Result<String, String>>) -> Self {
        Self {
            replies: Mutex::new(results.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }

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
    ) -> thinkloop::Result<String> {
        self.requests.lock().unwrap().push(history.to_vec());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(ThinkloopError::Provider(message).into()),
            None => Err(ThinkloopError::Provider("script exhausted".to_string()).into()),
        }
    }
}

/// Console that keeps `(kind, text)` pairs for assertions
#[derive(Default)]
pub struct RecordingConsole {
    events: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingConsole {
    pub fn texts(&self, kind: &str) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, t)| t.clone())
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

/// Session over the built-in tools rooted at `working_dir`
///
/// Clarification answers are read from `answers`.
pub fn session_in(
    working_dir: &Path,
    provider: Arc<ScriptedProvider>,
    config: AgentConfig,
    answers: &str,
) -> (Session, Arc<RecordingConsole>) {
    let console = Arc::new(RecordingConsole::default());
    let registry = ToolRegistryBuilder::new(working_dir.to_path_buf())
        .with_console(console.clone())
        .with_answer_reader(answer_reader(LineAnswers(Cursor::new(answers.to_string()))))
        .build()
        .expect("failed to build registry");
    let session =
        Session::new(provider, registry, config, console.clone()).expect("failed to build session");
    (session, console)
}
