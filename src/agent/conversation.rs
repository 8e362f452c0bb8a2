//! Conversation history
//!
//! An ordered, append-only record of every message exchanged in a session.
//! Entries are never edited, reordered or removed, and there is no size cap.

use crate::providers::{Message, Role};

/// Append-only conversation history
///
/// # Examples
///
/// ```
/// use thinkloop::agent::Conversation;
/// use thinkloop::providers::Message;
///
/// let mut conversation = Conversation::new();
/// conversation.append(Message::user("Hello"));
/// let before = conversation.snapshot();
///
/// conversation.append(Message::assistant("Hi!"));
/// assert_eq!(before.len(), 1);
/// assert_eq!(conversation.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the end
    pub fn append(&mut self, message: Message) {
        tracing::trace!(role = %message.role, len = message.content.len(), "append message");
        self.messages.push(message);
    }

    /// Append a user message
    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.append(Message::user(content));
    }

    /// Append an assistant message
    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.append(Message::assistant(content));
    }

    /// Append a system message
    pub fn add_system_message(&mut self, content: impl Into<String>) {
        self.append(Message::system(content));
    }

    /// Independent copy of the full ordered history
    ///
    /// Later appends do not affect a snapshot already taken.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    /// Borrow the messages in order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Most recent message, if any
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages with the given role
    pub fn count_role(&self, role: Role) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
