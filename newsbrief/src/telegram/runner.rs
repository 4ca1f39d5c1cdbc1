//! REPL runner: converts teloxide messages to core messages and passes them
//! to the handler chain, one spawned task per message.

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;
use crate::core::ToCoreMessage;

use super::adapters::TelegramMessageWrapper;

/// Starts the long-polling REPL with the given teloxide Bot and chain. Each
/// text message is converted to a core message and handled in its own task so
/// one slow pipeline does not block the listener.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    let chain = handler_chain;
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = chain.clone();

        async move {
            if msg.text().is_none() {
                info!(chat_id = msg.chat.id.0, "ignoring non-text message");
                return Ok(());
            }

            let core_msg = TelegramMessageWrapper(&msg).to_core();
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                content = %core_msg.content,
                "received message"
            );

            tokio::spawn(async move {
                if let Err(e) = chain.handle(&core_msg).await {
                    error!(error = %e, user_id = core_msg.user.id, "handler chain failed");
                }
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}
