//! Test utilities for the local server backend.
//!
//! Provides on-disk checkpoint fixtures and an in-process stub of an
//! OpenAI-compatible inference server.

#![allow(dead_code)]

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use chat_batch_core::LaunchConfig;
use chat_batch_server::{ChatCompletionRequest, ServerConfig};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Word-level tokenizer splitting on whitespace and punctuation.
const TOKENIZER_JSON: &str = r#"{
  "version": "1.0",
  "truncation": null,
  "padding": null,
  "added_tokens": [],
  "normalizer": null,
  "pre_tokenizer": { "type": "Whitespace" },
  "post_processor": null,
  "decoder": null,
  "model": {
    "type": "WordLevel",
    "vocab": { "[UNK]": 0, "INST": 1, "What": 2, "is": 3 },
    "unk_token": "[UNK]"
  }
}"#;

/// Checkpoint directory plus tokenizer inside a temporary root.
pub struct Fixture {
    _root: TempDir,
    pub checkpoint: PathBuf,
    pub tokenizer: PathBuf,
}

impl Fixture {
    /// Creates `llama-2-7b-chat/consolidated.00.pth` and `tokenizer.json`.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let checkpoint = root.path().join("llama-2-7b-chat");
        std::fs::create_dir(&checkpoint).expect("Failed to create checkpoint dir");
        std::fs::write(checkpoint.join("consolidated.00.pth"), b"weights")
            .expect("Failed to write weights");
        let tokenizer = root.path().join("tokenizer.json");
        std::fs::write(&tokenizer, TOKENIZER_JSON).expect("Failed to write tokenizer");

        Self {
            _root: root,
            checkpoint,
            tokenizer,
        }
    }

    pub fn launch(&self, max_seq_len: u32, max_batch_size: u32) -> LaunchConfig {
        LaunchConfig::new(&self.checkpoint, &self.tokenizer, max_seq_len, max_batch_size)
            .expect("Valid LaunchConfig")
    }
}

/// Switches the process working directory, restoring it on drop.
///
/// Other tests in this binary only use absolute paths.
pub struct CurrentDir {
    previous: PathBuf,
}

impl CurrentDir {
    pub fn enter(dir: &Path) -> Self {
        let previous = std::env::current_dir().expect("Current dir");
        std::env::set_current_dir(dir).expect("Failed to change dir");
        Self { previous }
    }
}

impl Drop for CurrentDir {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.previous);
    }
}

/// Server config pointing at `base_url`.
pub fn server_config(base_url: &str) -> ServerConfig {
    ServerConfig::builder()
        .base_url(base_url)
        .timeout(Duration::from_secs(10))
        .build()
        .expect("Valid ServerConfig")
}

/// Serves `app` on an ephemeral port and returns its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub server failed");
    });
    format!("http://{}", addr)
}

/// Base URL on which nothing is listening.
pub async fn closed_port() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Local address");
    drop(listener);
    format!("http://{}", addr)
}

/// Stub server that echoes the last turn back.
///
/// Prompts containing "slow" are answered after a delay so that responses
/// complete out of submission order.
pub fn echo_server() -> Router {
    Router::new()
        .route("/v1/models", get(list_models))
        .route("/v1/chat/completions", post(echo_completion))
}

/// Stub server whose completion endpoint always fails.
pub fn failing_server() -> Router {
    Router::new()
        .route("/v1/models", get(list_models))
        .route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "device lost") }),
        )
}

async fn list_models() -> Json<Value> {
    Json(json!({ "object": "list", "data": [{ "id": "llama-2-7b-chat" }] }))
}

async fn echo_completion(Json(request): Json<ChatCompletionRequest>) -> Json<Value> {
    let last = request
        .messages()
        .last()
        .map(|m| m.content().clone())
        .unwrap_or_default();

    if last.contains("slow") {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    let reply = format!("echo: {}", last);
    let logprobs = if *request.logprobs() == Some(true) {
        json!({ "content": [{ "token": "echo", "logprob": -0.5 }] })
    } else {
        Value::Null
    };

    Json(json!({
        "id": "chatcmpl-stub",
        "object": "chat.completion",
        "created": 0,
        "model": request.model(),
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": reply },
            "finish_reason": "stop",
            "logprobs": logprobs
        }],
        "usage": { "prompt_tokens": 3, "completion_tokens": 2, "total_tokens": 5 },
        "max_tokens_seen": request.max_tokens()
    }))
}
