//! Transport-agnostic bot trait: the operations the pipeline, progress
//! reporter, and handlers need from the chat transport.

use async_trait::async_trait;

use super::error::Result;
use super::types::Chat;

/// How outbound text is rendered by the transport.
///
/// `MarkdownV2` requires the text to have passed through
/// [`crate::telegram::markdown::escape`] first; `Plain` text is sent as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Plain,
    MarkdownV2,
}

/// Chat transport operations. Production code talks to Telegram; tests
/// substitute a capturing implementation.
#[async_trait]
pub trait Bot: Send + Sync {
    async fn send_message(&self, chat: &Chat, text: &str, mode: RenderMode) -> Result<()>;

    /// Sends a message and returns its id so it can be edited or deleted
    /// later (the progress-reporting protocol relies on this).
    async fn send_message_and_return_id(
        &self,
        chat: &Chat,
        text: &str,
        mode: RenderMode,
    ) -> Result<String>;

    async fn edit_message(
        &self,
        chat: &Chat,
        message_id: &str,
        text: &str,
        mode: RenderMode,
    ) -> Result<()>;

    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()>;
}
