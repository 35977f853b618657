use anyhow::Result;
use std::sync::Arc;

use pocketpal::cli::{Console, Repl};
use pocketpal::llm::OpenAiProvider;
use pocketpal::{logging, tools, Agent, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    logging::init_logging(&config.log_dir)?;
    tracing::info!("Starting pocketpal");

    let provider = Arc::new(OpenAiProvider::from_config(&config));
    let agent = Agent::new(Console::new(), provider, tools::default_registry()).with_config(&config);

    let mut repl = Repl::new(Console::new(), agent);
    repl.run().await?;

    tracing::info!("Exiting");
    Ok(())
}
