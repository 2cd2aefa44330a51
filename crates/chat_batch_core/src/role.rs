//! Role types for conversation participants.

use chat_batch_error::{ChatError, ChatErrorKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Author of a chat turn.
///
/// Serialized lowercase on the wire. `Display` yields the capitalized form
/// used in transcripts.
///
/// # Examples
///
/// ```
/// use chat_batch_core::Role;
///
/// assert_eq!(Role::Assistant.as_str(), "assistant");
/// assert_eq!(Role::Assistant.to_string(), "Assistant");
/// assert_eq!("user".parse::<Role>().unwrap(), Role::User);
/// assert!("narrator".parse::<Role>().is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Protocol name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl FromStr for Role {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(ChatError::new(ChatErrorKind::MalformedConversation(
                format!("unknown role '{}'", other),
            ))),
        }
    }
}
