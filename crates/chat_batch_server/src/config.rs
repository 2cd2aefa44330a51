//! Configuration for local inference server connection

use chat_batch_error::{ChatError, ChatErrorKind, ChatResult};
use derive_getters::Getters;
use std::time::Duration;

/// Default server address when `CHAT_BATCH_SERVER_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Configuration for local inference server connection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ServerConfig {
    /// Base URL of the server (e.g., "http://localhost:8080")
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
    /// Model identifier; defaults to the checkpoint directory name
    #[builder(default)]
    model: Option<String>,
    /// Optional API key (local servers usually don't require one)
    #[builder(default)]
    api_key: Option<String>,
    /// Per-request timeout; unset waits indefinitely
    #[builder(default)]
    timeout: Option<Duration>,
}

impl ServerConfig {
    /// Returns a builder for constructing a ServerConfig.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - `CHAT_BATCH_SERVER_URL` (default: "http://localhost:8080")
    /// - `CHAT_BATCH_SERVER_MODEL` (optional)
    /// - `CHAT_BATCH_SERVER_API_KEY` (optional)
    /// - `CHAT_BATCH_SERVER_TIMEOUT_SECS` (optional)
    pub fn from_env() -> ChatResult<Self> {
        let base_url = std::env::var("CHAT_BATCH_SERVER_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("CHAT_BATCH_SERVER_MODEL").ok();
        let api_key = std::env::var("CHAT_BATCH_SERVER_API_KEY").ok();
        let timeout = match std::env::var("CHAT_BATCH_SERVER_TIMEOUT_SECS") {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };

        ServerConfigBuilder::default()
            .base_url(base_url)
            .model(model)
            .api_key(api_key)
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::new(ChatErrorKind::Config(e.to_string())))
    }

    /// URL of an API endpoint below the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn parse_timeout(raw: &str) -> ChatResult<Duration> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        ChatError::new(ChatErrorKind::Config(format!(
            "CHAT_BATCH_SERVER_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
            raw
        )))
    })?;
    Ok(Duration::from_secs(secs))
}
