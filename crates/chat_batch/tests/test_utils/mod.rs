//! Test utilities for driver tests.
//!
//! Provides deterministic mock implementations of [`ChatService`].

#![allow(dead_code)]

use async_trait::async_trait;
use chat_batch::{
    ChatError, ChatErrorKind, ChatResult, ChatService, CompletionResult, Conversation,
    GenerationConfig, LaunchConfig,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock service answering each conversation from its last user turn.
///
/// Replies grow with the batch index so results have differing lengths. At
/// a non-zero temperature every reply carries a call counter, mimicking
/// sampling randomness.
#[derive(Debug)]
pub struct MockService {
    max_batch_size: usize,
    calls: AtomicUsize,
}

impl MockService {
    pub async fn with_batch_size(max_batch_size: u32) -> Self {
        let launch = LaunchConfig::new("mock-model", "tokenizer.json", 512, max_batch_size)
            .expect("Valid LaunchConfig");
        Self::build(&launch).await.expect("Mock build never fails")
    }

    /// Number of `chat_completion` calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatService for MockService {
    async fn build(config: &LaunchConfig) -> ChatResult<Self> {
        Ok(Self {
            max_batch_size: *config.max_batch_size() as usize,
            calls: AtomicUsize::new(0),
        })
    }

    async fn chat_completion(
        &self,
        batch: &[Conversation],
        config: &GenerationConfig,
    ) -> ChatResult<Vec<CompletionResult>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        if batch.len() > self.max_batch_size {
            return Err(ChatError::new(ChatErrorKind::capacity(
                "batch size",
                batch.len() as u64,
                self.max_batch_size as u64,
            )));
        }
        for conversation in batch {
            conversation.validate()?;
        }

        Ok(batch
            .iter()
            .enumerate()
            .map(|(index, conversation)| {
                let prompt = conversation
                    .last_user_turn()
                    .map(|m| m.content().as_str())
                    .unwrap_or_default();
                let mut reply = format!("Reply to: {}{}", prompt, "!".repeat(index));
                if !config.is_greedy() {
                    reply.push_str(&format!(" (sample {})", call));
                }
                CompletionResult::new(reply)
            })
            .collect())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model-v1"
    }
}

/// Mock service that drops the last result, violating the batch contract.
#[derive(Debug)]
pub struct ShortService;

#[async_trait]
impl ChatService for ShortService {
    async fn build(_config: &LaunchConfig) -> ChatResult<Self> {
        Ok(Self)
    }

    async fn chat_completion(
        &self,
        batch: &[Conversation],
        _config: &GenerationConfig,
    ) -> ChatResult<Vec<CompletionResult>> {
        Ok(batch
            .iter()
            .skip(1)
            .map(|_| CompletionResult::new("partial"))
            .collect())
    }

    fn provider_name(&self) -> &'static str {
        "short"
    }

    fn model_name(&self) -> &str {
        "short-model"
    }
}

/// Mock service that always fails with a generation error.
#[derive(Debug)]
pub struct FailingService;

#[async_trait]
impl ChatService for FailingService {
    async fn build(_config: &LaunchConfig) -> ChatResult<Self> {
        Ok(Self)
    }

    async fn chat_completion(
        &self,
        _batch: &[Conversation],
        _config: &GenerationConfig,
    ) -> ChatResult<Vec<CompletionResult>> {
        Err(ChatError::new(ChatErrorKind::Generation(
            "numerical instability".to_string(),
        )))
    }

    fn provider_name(&self) -> &'static str {
        "failing"
    }

    fn model_name(&self) -> &str {
        "failing-model"
    }
}

/// Builds a validated generation config.
pub fn generation_config(temperature: f32) -> GenerationConfig {
    GenerationConfig::new(None, temperature, 0.9).expect("Valid config")
}
