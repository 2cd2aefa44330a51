//! Chat generation service backed by a local inference server.
//!
//! The checkpoint is served by an OpenAI-compatible HTTP server (llama.cpp
//! server, mistral.rs, vLLM). This crate validates the checkpoint and
//! tokenizer locations, enforces the batch and context limits locally, and
//! fans a batch out as one chat completion request per conversation.

mod checkpoint;
mod client;
mod config;
mod prompt;
mod request;
mod response;

pub use checkpoint::{load_tokenizer, verify_checkpoint};
pub use client::LocalServerService;
pub use config::{ServerConfig, ServerConfigBuilder};
pub use prompt::{count_prompt_tokens, render_dialog};
pub use request::{ChatCompletionRequest, ChatCompletionRequestBuilder, ChatMessage};
pub use response::{
    ChatCompletionResponse, Choice, ChoiceLogprobs, ChoiceMessage, LogprobEntry, Usage,
};
