//! chat-batch binary.

use anyhow::Result;
use chat_batch::{
    BatchChatDriver, ChatService, Cli, LocalServerService, init_tracing,
    sample_generation_config, sample_instructions,
};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let launch = cli.launch_config()?;
    tracing::info!(
        checkpoint = %launch.checkpoint_location().display(),
        tokenizer = %launch.tokenizer_location().display(),
        max_seq_len = launch.max_seq_len(),
        max_batch_size = launch.max_batch_size(),
        "Building generation service"
    );

    let service = LocalServerService::build(&launch).await?;
    let config = sample_generation_config()?;

    let mut stdout = std::io::stdout().lock();
    BatchChatDriver::new(&service)
        .run(sample_instructions(), &config, &mut stdout)
        .await?;

    Ok(())
}
