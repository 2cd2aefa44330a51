//! Command-line arguments.

use chat_batch_core::LaunchConfig;
use chat_batch_error::ChatResult;
use clap::Parser;
use std::path::PathBuf;

/// Run a batch of chat instructions against a pretrained model.
#[derive(Parser, Debug, Clone)]
#[command(name = "chat-batch")]
#[command(version)]
#[command(about = "Submit a batch of chat instructions and print each reply")]
pub struct Cli {
    /// Directory containing the model checkpoint files
    #[arg(long)]
    pub checkpoint_location: PathBuf,

    /// Path to the tokenizer (HuggingFace tokenizer.json)
    #[arg(long)]
    pub tokenizer_location: PathBuf,

    /// Maximum sequence length for prompts plus generation
    #[arg(long, default_value_t = 512)]
    pub max_seq_len: u32,

    /// Maximum number of conversations per batch
    #[arg(long, default_value_t = 8)]
    pub max_batch_size: u32,
}

impl Cli {
    /// The immutable launch configuration these arguments describe.
    pub fn launch_config(&self) -> ChatResult<LaunchConfig> {
        LaunchConfig::new(
            &self.checkpoint_location,
            &self.tokenizer_location,
            self.max_seq_len,
            self.max_batch_size,
        )
    }
}
