//! Core data types for batch chat completion.
//!
//! This crate provides the request/response contract shared by the batch
//! driver and every generation service: roles, messages, conversations,
//! generation parameters, and completion results.

mod role;
mod message;
mod conversation;
mod generation;
mod completion;
mod launch;

pub use role::Role;
pub use message::Message;
pub use conversation::Conversation;
pub use generation::GenerationConfig;
pub use completion::{CompletionResult, TokenLogprob};
pub use launch::{LaunchConfig, LaunchConfigBuilder};
