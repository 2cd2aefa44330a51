//! Chat service backed by a local OpenAI-compatible inference server.

use crate::{
    ChatCompletionRequest, ChatCompletionResponse, ServerConfig, count_prompt_tokens,
    load_tokenizer, verify_checkpoint,
};
use async_trait::async_trait;
use chat_batch_core::{CompletionResult, Conversation, GenerationConfig, LaunchConfig};
use chat_batch_error::{ChatError, ChatErrorKind, ChatResult};
use chat_batch_interface::ChatService;
use futures::future::try_join_all;
use reqwest::{Client, RequestBuilder};
use std::path::Path;
use tokenizers::Tokenizer;
use tracing::{debug, error, info, instrument};

const PROVIDER_NAME: &str = "local-server";

/// Generation service that forwards conversations to a local inference
/// server serving the checkpoint.
///
/// Batch size and context length are enforced here, before any request
/// leaves the process.
pub struct LocalServerService {
    client: Client,
    server: ServerConfig,
    model: String,
    tokenizer: Tokenizer,
    max_seq_len: u32,
    max_batch_size: u32,
}

impl std::fmt::Debug for LocalServerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalServerService")
            .field("base_url", self.server.base_url())
            .field("model", &self.model)
            .field("max_seq_len", &self.max_seq_len)
            .field("max_batch_size", &self.max_batch_size)
            .finish()
    }
}

impl LocalServerService {
    /// Builds a service against an explicit server configuration.
    ///
    /// # Errors
    ///
    /// Returns a `Load` error if the checkpoint or tokenizer cannot be
    /// resolved, or if the server does not answer its health check.
    #[instrument(skip_all, fields(
        checkpoint = %launch.checkpoint_location().display(),
        base_url = %server.base_url(),
    ))]
    pub async fn connect(launch: &LaunchConfig, server: ServerConfig) -> ChatResult<Self> {
        verify_checkpoint(launch.checkpoint_location())?;
        let tokenizer = load_tokenizer(launch.tokenizer_location())?;

        let model = match server.model() {
            Some(model) => model.clone(),
            None => model_name_from_checkpoint(launch.checkpoint_location())?,
        };

        let mut builder = Client::builder();
        if let Some(timeout) = server.timeout() {
            builder = builder.timeout(*timeout);
        }
        let client = builder.build().map_err(|e| {
            ChatError::new(ChatErrorKind::Load(format!(
                "Failed to create HTTP client: {}",
                e
            )))
        })?;

        let service = Self {
            client,
            server,
            model,
            tokenizer,
            max_seq_len: *launch.max_seq_len(),
            max_batch_size: *launch.max_batch_size(),
        };
        service.health_check().await?;

        info!(
            model = %service.model,
            max_seq_len = service.max_seq_len,
            max_batch_size = service.max_batch_size,
            "Connected to inference server"
        );
        Ok(service)
    }

    /// Checks that the server is up and listing models.
    #[instrument(skip(self), fields(base_url = %self.server.base_url()))]
    pub async fn health_check(&self) -> ChatResult<()> {
        let url = self.server.endpoint("v1/models");
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Health check failed");
                ChatError::new(ChatErrorKind::Load(format!(
                    "Inference server unreachable at {}: {}",
                    url, e
                )))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::new(ChatErrorKind::Load(format!(
                "Inference server health check returned {}",
                status
            ))));
        }

        debug!("Inference server healthy");
        Ok(())
    }

    /// Builds one request per conversation, enforcing batch and context
    /// limits. Nothing is sent.
    ///
    /// # Errors
    ///
    /// `MalformedConversation` for an empty batch or invalid dialog,
    /// `Capacity` when the batch or a prompt exceeds its limit.
    pub fn prepare(
        &self,
        batch: &[Conversation],
        config: &GenerationConfig,
    ) -> ChatResult<Vec<ChatCompletionRequest>> {
        if batch.is_empty() {
            return Err(ChatError::new(ChatErrorKind::MalformedConversation(
                "batch has no conversations".to_string(),
            )));
        }
        if batch.len() > self.max_batch_size as usize {
            return Err(ChatError::new(ChatErrorKind::capacity(
                "batch size",
                batch.len() as u64,
                u64::from(self.max_batch_size),
            )));
        }

        batch
            .iter()
            .enumerate()
            .map(|(index, conversation)| {
                conversation.validate().map_err(|e| {
                    let reason = match e.kind() {
                        ChatErrorKind::MalformedConversation(reason) => reason.clone(),
                        other => other.to_string(),
                    };
                    ChatError::new(ChatErrorKind::MalformedConversation(format!(
                        "conversation {}: {}",
                        index, reason
                    )))
                })?;

                let prompt_tokens = count_prompt_tokens(&self.tokenizer, conversation)?;
                let max_tokens = self.generation_budget(prompt_tokens, config)?;
                debug!(index, prompt_tokens, max_tokens, "Prepared request");

                Ok(ChatCompletionRequest::for_conversation(
                    &self.model,
                    conversation,
                    config,
                    max_tokens,
                ))
            })
            .collect()
    }

    /// Tokens left for generation once the prompt is placed.
    ///
    /// At least one generated token must fit, so a prompt of `max_seq_len`
    /// tokens or more is a `Capacity` error. An unset `max_gen_len` defaults
    /// to `max_seq_len - 1`; either way the cap never exceeds the remaining
    /// context window.
    fn generation_budget(&self, prompt_tokens: usize, config: &GenerationConfig) -> ChatResult<u32> {
        let limit = u64::from(self.max_seq_len);
        if prompt_tokens as u64 >= limit {
            return Err(ChatError::new(ChatErrorKind::capacity(
                "prompt length",
                prompt_tokens as u64,
                limit,
            )));
        }

        let remaining = self.max_seq_len - prompt_tokens as u32;
        let requested = config
            .max_gen_len()
            .unwrap_or_else(|| self.max_seq_len.saturating_sub(1));
        Ok(requested.min(remaining))
    }

    async fn complete_one(
        &self,
        index: usize,
        request: &ChatCompletionRequest,
    ) -> ChatResult<CompletionResult> {
        let url = self.server.endpoint("v1/chat/completions");
        debug!(index, message_count = request.messages().len(), "Sending request");

        let response = self
            .authorize(self.client.post(&url))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(index, error = ?e, "HTTP request failed");
                ChatError::new(ChatErrorKind::Generation(format!(
                    "Request for conversation {} failed: {}",
                    index, e
                )))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(index, status = %status, error = %error_text, "API error");
            return Err(ChatError::new(ChatErrorKind::Generation(format!(
                "Server returned {} for conversation {}: {}",
                status, index, error_text
            ))));
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(index, error = ?e, "Failed to parse response");
            ChatError::new(ChatErrorKind::Generation(format!(
                "Failed to parse response for conversation {}: {}",
                index, e
            )))
        })?;

        if let Some(usage) = body.usage() {
            debug!(
                index,
                prompt_tokens = usage.prompt_tokens(),
                completion_tokens = usage.completion_tokens(),
                "Received response"
            );
        }

        body.into_completion()
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.server.api_key() {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Context window in tokens.
    pub fn max_seq_len(&self) -> u32 {
        self.max_seq_len
    }

    /// Maximum conversations per batch.
    pub fn max_batch_size(&self) -> u32 {
        self.max_batch_size
    }
}

/// Name of the checkpoint directory, resolved so that `.` and `..` components
/// yield the real directory name.
fn model_name_from_checkpoint(checkpoint: &Path) -> ChatResult<String> {
    let resolved = std::fs::canonicalize(checkpoint).map_err(|e| {
        ChatError::new(ChatErrorKind::Load(format!(
            "Cannot resolve checkpoint directory {}: {}",
            checkpoint.display(),
            e
        )))
    })?;

    resolved
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            ChatError::new(ChatErrorKind::Load(format!(
                "Cannot derive a model name from {}",
                resolved.display()
            )))
        })
}

#[async_trait]
impl ChatService for LocalServerService {
    async fn build(config: &LaunchConfig) -> ChatResult<Self> {
        Self::connect(config, ServerConfig::from_env()?).await
    }

    #[instrument(skip_all, fields(model = %self.model, batch_size = batch.len()))]
    async fn chat_completion(
        &self,
        batch: &[Conversation],
        config: &GenerationConfig,
    ) -> ChatResult<Vec<CompletionResult>> {
        let requests = self.prepare(batch, config)?;

        let results = try_join_all(
            requests
                .iter()
                .enumerate()
                .map(|(index, request)| self.complete_one(index, request)),
        )
        .await?;

        info!(completions = results.len(), "Batch completed");
        Ok(results)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
