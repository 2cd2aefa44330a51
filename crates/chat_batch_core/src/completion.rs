//! Completion results returned by a generation service.

use crate::{Message, Role};
use serde::{Deserialize, Serialize};

/// Log-probability of one generated token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenLogprob {
    /// Decoded token text
    pub token: String,
    /// Natural-log probability of the token
    pub logprob: f32,
}

/// The model's reply to one conversation of a batch.
///
/// # Examples
///
/// ```
/// use chat_batch_core::{CompletionResult, Role};
///
/// let result = CompletionResult::new("4");
/// assert_eq!(*result.generation().role(), Role::Assistant);
/// assert!(result.logprobs().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct CompletionResult {
    /// Generated assistant turn
    generation: Message,
    /// Per-token log-probabilities, when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    logprobs: Option<Vec<TokenLogprob>>,
}

impl CompletionResult {
    /// Wraps generated text as an assistant turn.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            generation: Message::new(Role::Assistant, content),
            logprobs: None,
        }
    }

    /// Attaches per-token log-probabilities.
    pub fn with_logprobs(self, logprobs: Vec<TokenLogprob>) -> Self {
        Self {
            logprobs: Some(logprobs),
            ..self
        }
    }
}
