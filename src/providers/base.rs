//! Base provider trait and conversation message types

use crate::error::Result;
use crate::tools::ToolDescriptor;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// External input, and tool outcomes folded back into the conversation
    User,
    /// Model output
    Assistant,
    /// Instructions and recorded reasoning traces
    System,
}

impl Role {
    /// Wire name of the role as used by chat-completion APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single role-tagged entry in a conversation
///
/// Tool outcomes are plain `user` messages whose content starts with
/// `TOOL_RESULT: ` or `TOOL_ERROR: `.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message author
    pub role: Role,
    /// Text content
    pub content: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use thinkloop::providers::{Message, Role};
    ///
    /// let msg = Message::user("Hello");
    /// assert_eq!(msg.role, Role::User);
    /// assert_eq!(msg.content, "Hello");
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Creates a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// Language model backend
///
/// A provider receives the full conversation and the tool list, and returns
/// the model's raw reply text. Implementations prepend their own system
/// prompt built from `tools`; callers never do.
///
/// # Examples
///
/// ```
/// use thinkloop::providers::{Message, Provider};
/// use thinkloop::tools::ToolDescriptor;
/// use thinkloop::error::Result;
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     async fn generate_response(
///         &self,
///         history: &[Message],
///         _tools: &[ToolDescriptor],
///     ) -> Result<String> {
///         Ok(history.last().map(|m| m.content.clone()).unwrap_or_default())
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short backend identifier, shown in status output
    fn name(&self) -> &str;

    /// Produce the next model reply for `history`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failures, non-success HTTP status codes
    /// and bodies that carry no usable reply.
    async fn generate_response(&self, history: &[Message], tools: &[ToolDescriptor])
        -> Result<String>;
}
