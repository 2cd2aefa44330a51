//! Generation parameters applied uniformly to a batch.

use chat_batch_error::{ChatError, ChatErrorKind, ChatResult};

/// Sampling controls forwarded to the generation service.
///
/// `max_gen_len` of `None` defers the cap to the service, which bounds it by
/// the remaining context window.
///
/// # Examples
///
/// ```
/// use chat_batch_core::GenerationConfig;
///
/// let config = GenerationConfig::new(None, 0.2, 0.9).unwrap();
/// assert_eq!(*config.temperature(), 0.2);
/// assert!(config.max_gen_len().is_none());
///
/// assert!(GenerationConfig::new(Some(0), 0.2, 0.9).is_err());
/// assert!(GenerationConfig::new(None, -1.0, 0.9).is_err());
/// assert!(GenerationConfig::new(None, 0.2, 1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, derive_getters::Getters)]
pub struct GenerationConfig {
    /// Maximum tokens to generate per conversation
    max_gen_len: Option<u32>,
    /// Sampling temperature; 0 selects greedy decoding
    temperature: f32,
    /// Nucleus sampling threshold
    top_p: f32,
    /// Request per-token log-probabilities
    logprobs: bool,
}

impl GenerationConfig {
    /// Creates a validated configuration without log-probabilities.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if `max_gen_len` is zero, `temperature` is
    /// negative or not finite, or `top_p` lies outside `[0, 1]`.
    #[track_caller]
    pub fn new(max_gen_len: Option<u32>, temperature: f32, top_p: f32) -> ChatResult<Self> {
        if max_gen_len == Some(0) {
            return Err(invalid("max_gen_len must be positive".to_string()));
        }
        if !temperature.is_finite() || temperature < 0.0 {
            return Err(invalid(format!(
                "temperature must be a finite value >= 0, got {}",
                temperature
            )));
        }
        if !(0.0..=1.0).contains(&top_p) {
            return Err(invalid(format!("top_p must be within [0, 1], got {}", top_p)));
        }

        Ok(Self {
            max_gen_len,
            temperature,
            top_p,
            logprobs: false,
        })
    }

    /// Returns a copy that requests per-token log-probabilities.
    pub fn with_logprobs(self, logprobs: bool) -> Self {
        Self { logprobs, ..self }
    }

    /// Whether sampling is disabled and decoding is greedy.
    pub fn is_greedy(&self) -> bool {
        self.temperature == 0.0
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_gen_len: None,
            temperature: 0.6,
            top_p: 0.9,
            logprobs: false,
        }
    }
}

#[track_caller]
fn invalid(message: String) -> ChatError {
    ChatError::new(ChatErrorKind::Config(message))
}
