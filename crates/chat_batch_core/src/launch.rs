//! Launch parameters for constructing a generation service.

use chat_batch_error::{ChatError, ChatErrorKind, ChatResult};
use std::path::PathBuf;

/// Immutable startup configuration, built once and passed by reference.
///
/// # Examples
///
/// ```
/// use chat_batch_core::LaunchConfig;
///
/// let config = LaunchConfig::builder()
///     .checkpoint_location("llama-2-7b-chat/")
///     .tokenizer_location("tokenizer.json")
///     .build()
///     .unwrap();
///
/// assert_eq!(*config.max_seq_len(), 512);
/// assert_eq!(*config.max_batch_size(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters, derive_builder::Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct LaunchConfig {
    /// Directory holding the model checkpoint
    checkpoint_location: PathBuf,
    /// Path to the tokenizer
    tokenizer_location: PathBuf,
    /// Maximum prompt plus generation length in tokens
    #[builder(default = "512")]
    max_seq_len: u32,
    /// Maximum number of conversations per batch
    #[builder(default = "8")]
    max_batch_size: u32,
}

impl LaunchConfig {
    /// Returns a builder for constructing a LaunchConfig.
    pub fn builder() -> LaunchConfigBuilder {
        LaunchConfigBuilder::default()
    }

    /// Creates a launch configuration from explicit values.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if either capacity bound is zero.
    #[track_caller]
    pub fn new(
        checkpoint_location: impl Into<PathBuf>,
        tokenizer_location: impl Into<PathBuf>,
        max_seq_len: u32,
        max_batch_size: u32,
    ) -> ChatResult<Self> {
        LaunchConfigBuilder::default()
            .checkpoint_location(checkpoint_location)
            .tokenizer_location(tokenizer_location)
            .max_seq_len(max_seq_len)
            .max_batch_size(max_batch_size)
            .build()
            .map_err(|e| ChatError::new(ChatErrorKind::Config(e.to_string())))
    }
}

impl LaunchConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.max_seq_len == Some(0) {
            return Err("max_seq_len must be positive".to_string());
        }
        if self.max_batch_size == Some(0) {
            return Err("max_batch_size must be positive".to_string());
        }
        Ok(())
    }
}
