//! Main entry: validate config, init logging, build components, run the REPL.

use anyhow::Result;
use tracing::{info, instrument};

use crate::components::{build_bot_components, build_handler_chain};
use crate::config::BotConfig;
use crate::core::init_tracing;
use crate::telegram::run_repl;

/// Runs the bot until the process is stopped.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;

    if let Some(dir) = std::path::Path::new(&config.log_file).parent() {
        std::fs::create_dir_all(dir)?;
    }
    init_tracing(&config.log_file)?;

    info!(mode = %config.mode, "Initializing bot");

    let components = build_bot_components(&config)?;
    let handler_chain = build_handler_chain(&config, &components);

    info!("Bot started successfully");

    run_repl(components.teloxide_bot.clone(), handler_chain).await
}
