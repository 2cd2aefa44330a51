//! Multi-turn conversations.

use crate::{Message, Role};
use chat_batch_error::{ChatError, ChatErrorKind, ChatResult};
use serde::{Deserialize, Serialize};

/// Prompt-template markers that may not appear inside message content.
const RESERVED_MARKERS: [&str; 4] = ["[INST]", "[/INST]", "<<SYS>>", "<</SYS>>"];

/// An ordered, non-empty sequence of messages forming one dialogue.
///
/// # Examples
///
/// ```
/// use chat_batch_core::{Conversation, Message};
///
/// let conversation = Conversation::single_turn("What is 2+2?");
/// assert_eq!(conversation.len(), 1);
/// assert!(conversation.validate().is_ok());
///
/// assert!(Conversation::new(Vec::<Message>::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Message>", into = "Vec<Message>")]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Creates a conversation from its turns in chronological order.
    ///
    /// # Errors
    ///
    /// Returns a `MalformedConversation` error if `messages` is empty.
    #[track_caller]
    pub fn new(messages: Vec<Message>) -> ChatResult<Self> {
        if messages.is_empty() {
            return Err(ChatError::new(ChatErrorKind::MalformedConversation(
                "conversation has no messages".to_string(),
            )));
        }
        Ok(Self { messages })
    }

    /// A conversation holding a single user turn.
    pub fn single_turn(content: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(content)],
        }
    }

    /// Turns in chronological order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false for a constructed conversation.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Leading system prompt, if any.
    pub fn system_prompt(&self) -> Option<&Message> {
        self.messages.first().filter(|m| *m.role() == Role::System)
    }

    /// The final user turn.
    pub fn last_user_turn(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| *m.role() == Role::User)
    }

    /// Checks the dialog shape a chat model accepts.
    ///
    /// An optional leading system message is followed by turns alternating
    /// user/assistant, starting and ending with a user turn. Content may not
    /// contain prompt-template markers.
    ///
    /// # Errors
    ///
    /// Returns a `MalformedConversation` error describing the first violation.
    #[track_caller]
    pub fn validate(&self) -> ChatResult<()> {
        let turns = match self.system_prompt() {
            Some(_) => &self.messages[1..],
            None => &self.messages[..],
        };

        if turns.is_empty() {
            return Err(malformed("conversation has no user turn".to_string()));
        }

        for (position, message) in turns.iter().enumerate() {
            let expected = if position % 2 == 0 {
                Role::User
            } else {
                Role::Assistant
            };
            if *message.role() != expected {
                return Err(malformed(format!(
                    "turn {} has role '{}', expected '{}'",
                    position,
                    message.role().as_str(),
                    expected.as_str()
                )));
            }
        }

        if turns.len() % 2 == 0 {
            return Err(malformed(
                "conversation must end with a user turn".to_string(),
            ));
        }

        if let Some(marker) = self.messages.iter().find_map(|m| {
            RESERVED_MARKERS
                .iter()
                .find(|marker| m.content().contains(*marker))
        }) {
            return Err(malformed(format!(
                "content contains reserved marker '{}'",
                marker
            )));
        }

        Ok(())
    }
}

#[track_caller]
fn malformed(reason: String) -> ChatError {
    ChatError::new(ChatErrorKind::MalformedConversation(reason))
}

impl TryFrom<Vec<Message>> for Conversation {
    type Error = ChatError;

    fn try_from(messages: Vec<Message>) -> Result<Self, Self::Error> {
        Self::new(messages)
    }
}

impl From<Conversation> for Vec<Message> {
    fn from(conversation: Conversation) -> Self {
        conversation.messages
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
