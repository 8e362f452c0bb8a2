//! External input sources for a session

use crate::agent_mode::AgentMode;
use std::collections::VecDeque;

/// Snapshot of a session handed to its input source between turns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub mode: AgentMode,
    pub provider: String,
    pub tool_count: usize,
    pub max_tool_iterations: usize,
    pub message_count: usize,
}

/// Pull-based supplier of external input
///
/// `next_input` blocks until input is available. `None` means the source
/// is exhausted and the session should end.
pub trait InputSource {
    /// Next input, or `None` when exhausted
    fn next_input(&mut self) -> Option<String>;

    /// Receives the session state before every `next_input` call
    fn observe(&mut self, _status: &SessionStatus) {}

    /// Mode requested while the last input was being read
    ///
    /// The session applies it before processing that input.
    fn take_mode_switch(&mut self) -> Option<AgentMode> {
        None
    }
}

/// Input source backed by a fixed list of inputs
///
/// # Examples
///
/// ```
/// use thinkloop::agent::{InputSource, ScriptedInput};
///
/// let mut input = ScriptedInput::new(["list files"]);
/// assert_eq!(input.next_input().as_deref(), Some("list files"));
/// assert_eq!(input.next_input(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    inputs: VecDeque<String>,
}

impl ScriptedInput {
    /// Create a source that yields `inputs` in order
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
        }
    }

    /// Inputs not yet consumed
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_input(&mut self) -> Option<String> {
        self.inputs.pop_front()
    }
}
