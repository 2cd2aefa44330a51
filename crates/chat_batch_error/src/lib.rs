//! Error types for the chat_batch workspace.
//!
//! Every failure surfaced by a generation service or the batch driver is a
//! [`ChatError`], which pairs a [`ChatErrorKind`] with the source location
//! where it was raised.

mod chat;

pub use chat::{ChatError, ChatErrorKind, ChatResult};
