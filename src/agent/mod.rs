//! Agent module for Thinkloop
//!
//! Conversation history, the text tool-call protocol, dispatch, the
//! reasoning pass and the session loop that ties them together.

pub mod conversation;
pub mod dispatcher;
pub mod input;
pub mod protocol;
pub mod reasoning;
pub mod session;

pub use conversation::Conversation;
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use input::{InputSource, ScriptedInput, SessionStatus};
pub use protocol::{parse_tool_call, ToolCallExpression};
pub use session::{Session, TurnOutcome};
