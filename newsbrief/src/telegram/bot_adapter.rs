//! Wraps teloxide::Bot and implements [`crate::core::Bot`]. Production code
//! sends messages via Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use teloxide::payloads::{EditMessageTextSetters, SendMessageSetters};
use teloxide::requests::Requester;
use teloxide::types::{ChatId, LinkPreviewOptions, MessageId, ParseMode};

use crate::core::{Bot as CoreBot, BotError, Chat, RenderMode, Result};

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }

    fn parse_mode(mode: RenderMode) -> Option<ParseMode> {
        match mode {
            RenderMode::Plain => None,
            RenderMode::MarkdownV2 => Some(ParseMode::MarkdownV2),
        }
    }

    /// Reports carry a source link; suppress Telegram's page preview.
    fn no_preview() -> LinkPreviewOptions {
        LinkPreviewOptions {
            is_disabled: true,
            url: None,
            prefer_small_media: false,
            prefer_large_media: false,
            show_above_text: false,
        }
    }

    fn message_id(message_id: &str) -> Result<MessageId> {
        let id: i32 = message_id
            .parse()
            .map_err(|_| BotError::Bot(format!("Invalid message_id: {}", message_id)))?;
        Ok(MessageId(id))
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str, mode: RenderMode) -> Result<()> {
        let mut request = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .link_preview_options(Self::no_preview());
        if let Some(parse_mode) = Self::parse_mode(mode) {
            request = request.parse_mode(parse_mode);
        }
        request.await.map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_message_and_return_id(
        &self,
        chat: &Chat,
        text: &str,
        mode: RenderMode,
    ) -> Result<String> {
        let mut request = self.bot.send_message(ChatId(chat.id), text.to_string());
        if let Some(parse_mode) = Self::parse_mode(mode) {
            request = request.parse_mode(parse_mode);
        }
        let sent = request.await.map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(sent.id.0.to_string())
    }

    async fn edit_message(
        &self,
        chat: &Chat,
        message_id: &str,
        text: &str,
        mode: RenderMode,
    ) -> Result<()> {
        let id = Self::message_id(message_id)?;
        let mut request = self.bot.edit_message_text(ChatId(chat.id), id, text);
        if let Some(parse_mode) = Self::parse_mode(mode) {
            request = request.parse_mode(parse_mode);
        }
        request.await.map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()> {
        let id = Self::message_id(message_id)?;
        self.bot
            .delete_message(ChatId(chat.id), id)
            .await
            .map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }
}
