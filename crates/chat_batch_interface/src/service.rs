//! The generation service capability.

use async_trait::async_trait;
use chat_batch_core::{CompletionResult, Conversation, GenerationConfig, LaunchConfig};
use chat_batch_error::ChatResult;

/// A conversational generation service.
///
/// Implementations own everything between a conversation and its reply:
/// weights, tokenization, batching, sampling. Callers see a handle that is
/// built once and then used by shared reference.
#[async_trait]
pub trait ChatService: Send + Sync + Sized {
    /// Construct a ready-to-use handle.
    ///
    /// Fails with a `Load` error if the checkpoint or tokenizer cannot be
    /// resolved.
    async fn build(config: &LaunchConfig) -> ChatResult<Self>;

    /// Complete every conversation of `batch` with the same `config`.
    ///
    /// On success the result at index `i` answers `batch[i]` and the result
    /// length equals the batch length. Any failure fails the whole batch:
    /// `Capacity` when the batch or a prompt exceeds the configured limits,
    /// `MalformedConversation` for invalid dialogs, `Generation` otherwise.
    async fn chat_completion(
        &self,
        batch: &[Conversation],
        config: &GenerationConfig,
    ) -> ChatResult<Vec<CompletionResult>>;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str;

    /// Model served by this handle.
    fn model_name(&self) -> &str;
}
