//! News handler: maps inbound text to pipeline runs and renders the results.
//!
//! Two operating modes share the pipeline. Link mode treats the message as an
//! article URL and produces one report. Category mode resolves the message to
//! at most a few article URLs via search and processes them sequentially,
//! reusing one status message across articles and isolating per-article
//! failures.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use newswire::NewsSearch;
use tracing::{error, info, instrument};

use crate::config::BotMode;
use crate::core::{Bot, Chat, Handler, HandlerError, HandlerResponse, Message, RenderMode, Result};
use crate::pipeline::{ArticlePipeline, Phase, ProgressReporter};
use crate::telegram::markdown::{self, MAX_MESSAGE_LEN};

const MSG_DELIVERY_FAILED: &str = "⚠️ Failed to deliver the report, please try again later.";

pub struct NewsHandler {
    bot: Arc<dyn Bot>,
    pipeline: Arc<ArticlePipeline>,
    search: Arc<dyn NewsSearch>,
    mode: BotMode,
    /// Unconditional sleep between category-mode articles, from config.
    article_delay: Duration,
    search_limit: usize,
}

impl NewsHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        pipeline: Arc<ArticlePipeline>,
        search: Arc<dyn NewsSearch>,
        mode: BotMode,
        article_delay: Duration,
        search_limit: usize,
    ) -> Self {
        Self {
            bot,
            pipeline,
            search,
            mode,
            article_delay,
            search_limit,
        }
    }

    /// Escapes and chunks the rendered report, then sends each slice.
    async fn send_report(&self, chat: &Chat, rendered: &str) -> Result<()> {
        let escaped = markdown::escape(rendered);
        for part in markdown::chunk(&escaped, MAX_MESSAGE_LEN) {
            self.bot
                .send_message(chat, &part, RenderMode::MarkdownV2)
                .await?;
        }
        Ok(())
    }

    /// Link mode: one article, one report (or one rewritten failure).
    #[instrument(skip(self, chat))]
    async fn process_link(&self, chat: &Chat, url: &str) -> Result<HandlerResponse> {
        let reporter = ProgressReporter::new(self.bot.clone());
        let ticket = match reporter.begin(chat, Phase::Started.label()).await {
            Ok(ticket) => ticket,
            Err(e) => {
                error!(error = %e, "failed to send progress message");
                return Ok(HandlerResponse::Stop);
            }
        };

        match self.pipeline.run(url, &ticket).await {
            Ok(report) => {
                ticket.finish().await;
                let rendered = report.render_plain();
                if let Err(e) = self.send_report(chat, &rendered).await {
                    error!(error = %e, url = %url, "failed to deliver report");
                    let _ = self
                        .bot
                        .send_message(chat, MSG_DELIVERY_FAILED, RenderMode::Plain)
                        .await;
                    return Ok(HandlerResponse::Stop);
                }
                Ok(HandlerResponse::Reply(rendered))
            }
            Err(e) => {
                info!(stage = %e.stage(), error = %e, url = %url, "pipeline failed");
                ticket.fail(&format!("⚠️ {}", e)).await;
                Ok(HandlerResponse::Stop)
            }
        }
    }

    /// Category mode: resolve the keyword, then run each article through the
    /// full pipeline. One article's failure is reported inline and does not
    /// abort the rest; only a transport fault ends the whole request.
    #[instrument(skip(self, chat))]
    async fn process_category(&self, chat: &Chat, keyword: &str) -> Result<HandlerResponse> {
        let reporter = ProgressReporter::new(self.bot.clone());
        let searching = format!(
            "🔎 Searching for top {} news articles in {}...\nThis may take a few seconds.",
            self.search_limit, keyword
        );
        let ticket = match reporter.begin(chat, &searching).await {
            Ok(ticket) => ticket,
            Err(e) => {
                error!(error = %e, "failed to send progress message");
                return Ok(HandlerResponse::Stop);
            }
        };

        let articles = match self.search.search(keyword).await {
            Ok(articles) => articles,
            Err(e) => {
                info!(error = %e, keyword = %keyword, "search failed");
                ticket.fail(&format!("⚠️ {}", e)).await;
                return Ok(HandlerResponse::Stop);
            }
        };

        let total = articles.len();
        for (index, found) in articles.iter().enumerate() {
            tokio::time::sleep(self.article_delay).await;
            ticket
                .announce(&format!("📢 Fetching article {} of {}...", index + 1, total))
                .await;

            match self.pipeline.run(&found.url, &ticket).await {
                Ok(report) => {
                    if let Err(e) = self.send_report(chat, &report.render_plain()).await {
                        error!(error = %e, url = %found.url, "failed to deliver report");
                        ticket.fail(MSG_DELIVERY_FAILED).await;
                        return Ok(HandlerResponse::Stop);
                    }
                }
                Err(e) => {
                    info!(stage = %e.stage(), error = %e, url = %found.url, "article failed, continuing");
                    if let Err(send_err) = self
                        .bot
                        .send_message(chat, &format!("⚠️ {}", e), RenderMode::Plain)
                        .await
                    {
                        error!(error = %send_err, "failed to deliver failure notice");
                        ticket.fail(MSG_DELIVERY_FAILED).await;
                        return Ok(HandlerResponse::Stop);
                    }
                }
            }
        }

        ticket.finish().await;
        Ok(HandlerResponse::Stop)
    }
}

#[async_trait]
impl Handler for NewsHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.message_type != "text" {
            return Ok(HandlerResponse::Continue);
        }
        let text = message.content.trim();
        if text.starts_with('/') {
            // Commands are not article references; earlier handlers own them.
            return Ok(HandlerResponse::Continue);
        }
        if text.is_empty() {
            return Err(HandlerError::EmptyContent.into());
        }

        match self.mode {
            BotMode::Link => self.process_link(&message.chat, text).await,
            BotMode::Category => self.process_category(&message.chat, text).await,
        }
    }
}
