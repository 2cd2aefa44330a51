use chat_batch_core::{CompletionResult, Role, TokenLogprob};
use chat_batch_error::{ChatError, ChatErrorKind, ChatResult};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completion response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Getters)]
pub struct ChatCompletionResponse {
    /// Unique identifier for the completion
    #[serde(default)]
    id: String,
    /// Model used for completion
    #[serde(default)]
    model: String,
    /// Generated completions
    choices: Vec<Choice>,
    /// Token usage statistics
    #[serde(default)]
    usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// Converts the first choice into a completion result.
    ///
    /// The reply is always recorded as an assistant turn, whatever role the
    /// server echoed.
    #[track_caller]
    pub fn into_completion(self) -> ChatResult<CompletionResult> {
        let choice = self.choices.into_iter().next().ok_or_else(|| {
            ChatError::new(ChatErrorKind::Generation(
                "No choices in response".to_string(),
            ))
        })?;

        if choice.message.role != Role::Assistant.as_str() {
            tracing::debug!(role = %choice.message.role, "Server returned non-assistant role");
        }

        let result = CompletionResult::new(choice.message.content);
        Ok(match choice.logprobs.and_then(|l| l.content) {
            Some(entries) => result.with_logprobs(
                entries
                    .into_iter()
                    .map(|entry| TokenLogprob {
                        token: entry.token,
                        logprob: entry.logprob,
                    })
                    .collect(),
            ),
            None => result,
        })
    }
}

/// A completion choice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Getters)]
pub struct Choice {
    /// Index of this choice
    #[serde(default)]
    index: u32,
    /// The generated message
    message: ChoiceMessage,
    /// Reason why generation finished
    #[serde(default)]
    finish_reason: Option<String>,
    /// Token log-probabilities, when requested
    #[serde(default)]
    logprobs: Option<ChoiceLogprobs>,
}

/// Message in a choice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Getters)]
pub struct ChoiceMessage {
    /// Role of the message (typically "assistant")
    role: String,
    /// Generated content
    #[serde(default)]
    content: String,
}

/// Log-probability block of a choice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Getters)]
pub struct ChoiceLogprobs {
    /// One entry per generated token
    #[serde(default)]
    content: Option<Vec<LogprobEntry>>,
}

/// Log-probability of a single token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Getters)]
pub struct LogprobEntry {
    /// Token text
    token: String,
    /// Log-probability of the token
    logprob: f32,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Getters)]
pub struct Usage {
    /// Tokens in the prompt
    #[serde(default)]
    prompt_tokens: u32,
    /// Tokens in the completion
    #[serde(default)]
    completion_tokens: u32,
    /// Total tokens used
    #[serde(default)]
    total_tokens: u32,
}
