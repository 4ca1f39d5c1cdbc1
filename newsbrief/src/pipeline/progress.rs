//! Progress reporting: one editable status message per in-flight request.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{debug, error};

use crate::core::{Bot, Chat, RenderMode, Result};

/// Pipeline phases, in execution order. Transitions are strictly forward;
/// a request ends in either a final edit (failure) or a delete (success).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Started,
    Extracting,
    Summarizing,
    GeneratingTitle,
    AnalyzingTone,
    Classifying,
}

impl Phase {
    /// Human-readable status text shown for this phase.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Started => "⏳ Processing your article...",
            Phase::Extracting => "🔍 Extracting content from the link...",
            Phase::Summarizing => "📝 Summarizing the article...",
            Phase::GeneratingTitle => "🖊 Generating a catchy title...",
            Phase::AnalyzingTone => "🎭 Analyzing the article's tone...",
            Phase::Classifying => "📂 Classifying the news category...",
        }
    }
}

/// Receives phase transitions from the orchestrator as it advances.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    async fn phase(&self, phase: Phase);
}

/// Sink that discards phase updates (batch callers, tests).
pub struct NoProgress;

#[async_trait]
impl ProgressSink for NoProgress {
    async fn phase(&self, _phase: Phase) {}
}

/// Creates status messages and hands out tickets bound to them.
pub struct ProgressReporter {
    bot: Arc<dyn Bot>,
}

impl ProgressReporter {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }

    /// Sends the initial status message and returns the ticket owning it.
    pub async fn begin(&self, chat: &Chat, text: &str) -> Result<ProgressTicket> {
        let message_id = self
            .bot
            .send_message_and_return_id(chat, text, RenderMode::Plain)
            .await?;
        Ok(ProgressTicket {
            bot: self.bot.clone(),
            chat: chat.clone(),
            message_id,
            current: Mutex::new(Phase::Started),
        })
    }
}

/// Owns one status message for the lifetime of one request. Dropping a ticket
/// without calling [`fail`](Self::fail) or [`finish`](Self::finish) leaves
/// the message behind; every code path must end in one of the two.
pub struct ProgressTicket {
    bot: Arc<dyn Bot>,
    chat: Chat,
    message_id: String,
    current: Mutex<Phase>,
}

impl ProgressTicket {
    /// Rewrites the status message with the phase label. Backward or repeated
    /// phases are ignored so the visible status only ever moves forward.
    /// Edit failures are logged, not propagated; progress is best-effort.
    pub async fn advance(&self, phase: Phase) {
        {
            let mut current = self.current.lock().unwrap();
            if phase <= *current {
                debug!(?phase, current = ?*current, "ignoring non-forward phase transition");
                return;
            }
            *current = phase;
        }
        self.edit(phase.label()).await;
    }

    /// Rewrites the status message with free text and restarts the phase
    /// sequence (category mode reuses one message across articles).
    pub async fn announce(&self, text: &str) {
        *self.current.lock().unwrap() = Phase::Started;
        self.edit(text).await;
    }

    /// Final edit: replaces the status message with failure text.
    pub async fn fail(self, text: &str) {
        self.edit(text).await;
    }

    /// Deletes the status message.
    pub async fn finish(self) {
        if let Err(e) = self.bot.delete_message(&self.chat, &self.message_id).await {
            error!(error = %e, message_id = %self.message_id, "failed to delete progress message");
        }
    }

    async fn edit(&self, text: &str) {
        if let Err(e) = self
            .bot
            .edit_message(&self.chat, &self.message_id, text, RenderMode::Plain)
            .await
        {
            error!(error = %e, message_id = %self.message_id, "failed to edit progress message");
        }
    }
}

#[async_trait]
impl ProgressSink for ProgressTicket {
    async fn phase(&self, phase: Phase) {
        self.advance(phase).await;
    }
}
