//! ask_human_for_clarification tool
//!
//! Shows the model's question on the operator console and blocks until the
//! human answers with one line.

use crate::console::Console;
use crate::tools::{parse_args, ToolError};
use serde::Deserialize;
use std::io::BufRead;
use std::sync::{Arc, Mutex};

/// Registry name of the tool
pub const NAME: &str = "ask_human_for_clarification";

/// Description rendered into the system prompt
pub const DESCRIPTION: &str = r#"When necessary, asks the human for help with CRITICAL doubts. Requires a JSON object with the key "question" holding your question. Example: {"question": "Which directory should I use?"}"#;

/// Shared handle to the line source answers are read from
pub type AnswerReader = Arc<Mutex<Box<dyn AnswerSource>>>;

/// Something a human answer line can be read from
pub trait AnswerSource: Send {
    /// Append one line to `line`, returning the bytes read (0 at end of input)
    fn read_answer(&mut self, line: &mut String) -> std::io::Result<usize>;
}

/// Answers typed on the process's standard input
///
/// Reads go through the process-wide stdin handle so no bytes are held in
/// a private buffer between questions.
#[derive(Debug, Default)]
pub struct StdinAnswers;

impl AnswerSource for StdinAnswers {
    fn read_answer(&mut self, line: &mut String) -> std::io::Result<usize> {
        std::io::stdin().read_line(line)
    }
}

/// Answers read from any buffered reader
#[derive(Debug)]
pub struct LineAnswers<R>(pub R);

impl<R: BufRead + Send> AnswerSource for LineAnswers<R> {
    fn read_answer(&mut self, line: &mut String) -> std::io::Result<usize> {
        self.0.read_line(line)
    }
}

/// Wrap `source` into a shareable [`AnswerReader`]
pub fn answer_reader(source: impl AnswerSource + 'static) -> AnswerReader {
    let boxed: Box<dyn AnswerSource> = Box::new(source);
    Arc::new(Mutex::new(boxed))
}

#[derive(Debug, Deserialize)]
struct AskHumanParams {
    #[serde(default)]
    question: String,
}

/// Human-in-the-loop question tool
pub struct AskHumanTool {
    console: Arc<dyn Console>,
    answers: AnswerReader,
}

impl AskHumanTool {
    /// Create the tool reading answers from `answers`
    pub fn new(console: Arc<dyn Console>, answers: AnswerReader) -> Self {
        Self { console, answers }
    }

    /// Create the tool reading answers from standard input
    pub fn stdin(console: Arc<dyn Console>) -> Self {
        Self::new(console, answer_reader(StdinAnswers))
    }

    /// Ask the question and return the trimmed answer
    pub async fn execute(&self, raw_args: &str) -> Result<String, ToolError> {
        let params: AskHumanParams = parse_args(raw_args)?;
        if params.question.trim().is_empty() {
            return Err(ToolError::InvalidArguments(
                "'question' is required".to_string(),
            ));
        }

        self.console.print_question(&params.question);

        let answers = Arc::clone(&self.answers);
        let answer = tokio::task::spawn_blocking(move || {
            let mut reader = answers
                .lock()
                .map_err(|_| ToolError::Interaction("answer source is poisoned".to_string()))?;
            let mut line = String::new();
            let read = reader
                .read_answer(&mut line)
                .map_err(|e| ToolError::Interaction(e.to_string()))?;
            if read == 0 {
                return Err(ToolError::Interaction("input closed".to_string()));
            }
            Ok(line.trim().to_string())
        })
        .await
        .map_err(|e| ToolError::Interaction(e.to_string()))??;

        tracing::debug!(question = %params.question, "human answered clarification");
        Ok(answer)
    }
}

impl std::fmt::Debug for AskHumanTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AskHumanTool").finish_non_exhaustive()
    }
}
