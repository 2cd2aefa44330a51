use chat_batch_core::{Conversation, GenerationConfig, Message};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completion request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ChatCompletionRequest {
    /// Model identifier
    model: String,
    /// Conversation messages
    messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    max_tokens: Option<u32>,
    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    temperature: Option<f32>,
    /// Top-p sampling parameter
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    top_p: Option<f32>,
    /// Return per-token log-probabilities
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    logprobs: Option<bool>,
}

impl ChatCompletionRequest {
    /// Creates a new builder for ChatCompletionRequest.
    pub fn builder() -> ChatCompletionRequestBuilder {
        ChatCompletionRequestBuilder::default()
    }

    /// Request for one conversation, forwarding its turns verbatim.
    pub fn for_conversation(
        model: &str,
        conversation: &Conversation,
        config: &GenerationConfig,
        max_tokens: u32,
    ) -> Self {
        Self {
            model: model.to_string(),
            messages: conversation.messages().iter().map(ChatMessage::from).collect(),
            max_tokens: Some(max_tokens),
            temperature: Some(*config.temperature()),
            top_p: Some(*config.top_p()),
            logprobs: config.logprobs().then_some(true),
        }
    }
}

/// A message in the conversation
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    role: String,
    /// Message content
    content: String,
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role().as_str().to_string(),
            content: message.content().clone(),
        }
    }
}
