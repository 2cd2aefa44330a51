//! Batch chat completion driver.
//!
//! Submits a batch of independent conversations to a [`ChatService`] in a
//! single call and pairs every conversation with its reply by position.
//!
//! # Example
//!
//! ```no_run
//! use chat_batch::{BatchChatDriver, ChatService, LaunchConfig, LocalServerService};
//! use chat_batch::{sample_generation_config, sample_instructions};
//!
//! # async fn run() -> chat_batch::ChatResult<()> {
//! let launch = LaunchConfig::new("llama-2-7b-chat", "tokenizer.json", 512, 8)?;
//! let service = LocalServerService::build(&launch).await?;
//!
//! let mut stdout = std::io::stdout();
//! BatchChatDriver::new(&service)
//!     .run(sample_instructions(), &sample_generation_config()?, &mut stdout)
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod cli;
mod driver;
mod observability;
mod samples;
mod transcript;

pub use cli::Cli;
pub use driver::BatchChatDriver;
pub use observability::init_tracing;
pub use samples::{sample_generation_config, sample_instructions};
pub use transcript::{SEPARATOR, write_transcript};

pub use chat_batch_core::{
    CompletionResult, Conversation, GenerationConfig, LaunchConfig, LaunchConfigBuilder, Message,
    Role, TokenLogprob,
};
pub use chat_batch_error::{ChatError, ChatErrorKind, ChatResult};
pub use chat_batch_interface::ChatService;
pub use chat_batch_server::{LocalServerService, ServerConfig};
