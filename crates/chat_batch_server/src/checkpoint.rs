//! Checkpoint and tokenizer resolution.

use chat_batch_error::{ChatError, ChatErrorKind, ChatResult};
use std::path::Path;
use tokenizers::Tokenizer;
use tracing::{debug, instrument};

/// File extensions recognised as model weights.
const WEIGHT_EXTENSIONS: [&str; 4] = ["pth", "safetensors", "gguf", "bin"];

/// Ensures `dir` is a directory holding at least one weight file.
///
/// Returns the number of weight files found.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn verify_checkpoint(dir: &Path) -> ChatResult<usize> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        ChatError::new(ChatErrorKind::Load(format!(
            "Cannot read checkpoint directory {}: {}",
            dir.display(),
            e
        )))
    })?;

    let shards = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| WEIGHT_EXTENSIONS.contains(&ext))
        })
        .count();

    if shards == 0 {
        return Err(ChatError::new(ChatErrorKind::Load(format!(
            "No checkpoint files found in {}",
            dir.display()
        ))));
    }

    debug!(shards, "Checkpoint verified");
    Ok(shards)
}

/// Loads a HuggingFace `tokenizer.json`.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_tokenizer(path: &Path) -> ChatResult<Tokenizer> {
    let tokenizer = Tokenizer::from_file(path).map_err(|e| {
        ChatError::new(ChatErrorKind::Load(format!(
            "Cannot load tokenizer {}: {}",
            path.display(),
            e
        )))
    })?;

    debug!(vocab_size = tokenizer.get_vocab_size(true), "Tokenizer loaded");
    Ok(tokenizer)
}
