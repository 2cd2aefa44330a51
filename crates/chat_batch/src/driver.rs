//! The batch chat driver.

use crate::write_transcript;
use chat_batch_core::{CompletionResult, Conversation, GenerationConfig};
use chat_batch_error::{ChatError, ChatErrorKind, ChatResult};
use chat_batch_interface::ChatService;
use std::io::Write;
use tracing::{debug, info, instrument};

/// Submits one batch to a generation service and pairs the replies.
///
/// The driver calls the service exactly once per [`run`](Self::run): no
/// sub-batching, no retries. Failures from the service propagate unchanged.
#[derive(Debug)]
pub struct BatchChatDriver<'a, S> {
    service: &'a S,
}

impl<'a, S> BatchChatDriver<'a, S>
where
    S: ChatService,
{
    /// Creates a driver over a built service handle.
    pub fn new(service: &'a S) -> Self {
        Self { service }
    }

    /// Completes `conversations` in one call and writes the transcript.
    ///
    /// Returns each conversation paired with its reply, in input order.
    ///
    /// # Errors
    ///
    /// `MalformedConversation` for an empty batch, any error the service
    /// reports, `Generation` if the service returns a result count that does
    /// not match the batch, and `Io` if the transcript cannot be written.
    #[instrument(
        skip_all,
        fields(
            provider = self.service.provider_name(),
            model = %self.service.model_name(),
            batch_size = conversations.len(),
        )
    )]
    pub async fn run<W: Write>(
        &self,
        conversations: Vec<Conversation>,
        config: &GenerationConfig,
        out: &mut W,
    ) -> ChatResult<Vec<(Conversation, CompletionResult)>> {
        if conversations.is_empty() {
            return Err(ChatError::new(ChatErrorKind::MalformedConversation(
                "batch has no conversations".to_string(),
            )));
        }

        info!(
            temperature = config.temperature(),
            top_p = config.top_p(),
            max_gen_len = ?config.max_gen_len(),
            "Submitting batch"
        );
        let results = self.service.chat_completion(&conversations, config).await?;

        if results.len() != conversations.len() {
            return Err(ChatError::new(ChatErrorKind::Generation(format!(
                "service returned {} results for {} conversations",
                results.len(),
                conversations.len()
            ))));
        }

        let pairs: Vec<(Conversation, CompletionResult)> =
            conversations.into_iter().zip(results).collect();

        for (index, (conversation, result)) in pairs.iter().enumerate() {
            debug!(
                index,
                prompt = conversation.last_user_turn().map(|m| m.content().as_str()),
                reply_len = result.generation().content().len(),
                "Paired result"
            );
        }

        write_transcript(out, &pairs)?;
        Ok(pairs)
    }
}
