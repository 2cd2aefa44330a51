//! Message types for conversation history.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single chat turn.
///
/// # Examples
///
/// ```
/// use chat_batch_core::{Message, Role};
///
/// let message = Message::user("What is 2+2?");
///
/// assert_eq!(*message.role(), Role::User);
/// assert_eq!(message.content(), "What is 2+2?");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct Message {
    /// The role of the message author
    role: Role,
    /// Text of the turn
    content: String,
}

impl Message {
    /// Creates a new message with the given role and content.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}
