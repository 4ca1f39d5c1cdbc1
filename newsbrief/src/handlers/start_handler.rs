//! `/start` command handler: greets the user with mode-appropriate usage.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::config::BotMode;
use crate::core::{Bot, Handler, HandlerResponse, Message, RenderMode, Result};

const GREETING_LINK: &str =
    "👋 Hello! Send me a news article link, and I'll summarize it for you!";
const GREETING_CATEGORY: &str = "Welcome to the AI News Summarizer Bot! 📰\n\
     Please type a category (e.g., 'Technology', 'Sports', 'Health') and I'll fetch the latest news for you.";

/// Answers `/start`; all other messages pass through to the next handler.
pub struct StartHandler {
    bot: Arc<dyn Bot>,
    mode: BotMode,
}

impl StartHandler {
    pub fn new(bot: Arc<dyn Bot>, mode: BotMode) -> Self {
        Self { bot, mode }
    }

    fn greeting(&self) -> &'static str {
        match self.mode {
            BotMode::Link => GREETING_LINK,
            BotMode::Category => GREETING_CATEGORY,
        }
    }
}

#[async_trait]
impl Handler for StartHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.content.trim() != "/start" {
            return Ok(HandlerResponse::Continue);
        }

        info!(user_id = message.user.id, "answering /start");
        if let Err(e) = self
            .bot
            .send_message(&message.chat, self.greeting(), RenderMode::Plain)
            .await
        {
            error!(error = %e, "failed to send greeting");
        }
        Ok(HandlerResponse::Stop)
    }
}
