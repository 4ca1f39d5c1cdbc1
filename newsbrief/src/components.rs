//! Dependency wiring: builds the transport adapter, capability clients, the
//! pipeline, and the handler chain from config.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use hf_inference::{
    HfClient, HfSentimentClassifier, HfSummarizer, HfTextGenerator, HfZeroShotClassifier,
};
use newswire::{GNewsClient, HttpArticleExtractor, NewsSearch};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::core::Bot;
use crate::handlers::{NewsHandler, StartHandler};
use crate::pipeline::ArticlePipeline;
use crate::telegram::TelegramBotAdapter;

/// Shared components handed to handlers. Cheap to clone.
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    pub bot: Arc<dyn Bot>,
    pub pipeline: Arc<ArticlePipeline>,
    pub search: Arc<dyn NewsSearch>,
}

/// Builds transport and capability clients from config.
pub fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let teloxide_bot = match &config.telegram_api_url {
        Some(url) => {
            let api_url: reqwest::Url = url.parse()?;
            teloxide::Bot::new(config.bot_token.clone()).set_api_url(api_url)
        }
        None => teloxide::Bot::new(config.bot_token.clone()),
    };
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    let hf = match &config.hf_base_url {
        Some(base) => HfClient::with_base_url(config.hf_api_key.clone(), base.clone()),
        None => HfClient::new(config.hf_api_key.clone()),
    };
    let summarizer = Arc::new(HfSummarizer::new(hf.clone(), config.summarizer_model.clone()));
    let title_generator = Arc::new(HfTextGenerator::new(hf.clone(), config.title_model.clone()));
    let sentiment = Arc::new(HfSentimentClassifier::new(
        hf.clone(),
        config.sentiment_model.clone(),
    ));
    let categorizer = Arc::new(HfZeroShotClassifier::new(hf, config.zero_shot_model.clone()));

    let extractor = Arc::new(HttpArticleExtractor::default());
    let pipeline = Arc::new(ArticlePipeline::new(
        extractor,
        summarizer,
        title_generator,
        sentiment,
        categorizer,
    ));

    let gnews = match &config.gnews_base_url {
        Some(base) => GNewsClient::with_base_url(config.gnews_api_key.clone(), base.clone()),
        None => GNewsClient::new(config.gnews_api_key.clone()),
    };
    let search: Arc<dyn NewsSearch> = Arc::new(
        gnews
            .with_lang(config.search_lang.clone())
            .with_country(config.search_country.clone())
            .with_limit(config.search_limit),
    );

    Ok(BotComponents {
        teloxide_bot,
        bot,
        pipeline,
        search,
    })
}

/// Builds the handler chain: `/start` greeting first, then the news handler.
pub fn build_handler_chain(config: &BotConfig, components: &BotComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(StartHandler::new(
            components.bot.clone(),
            config.mode,
        )))
        .add_handler(Arc::new(NewsHandler::new(
            components.bot.clone(),
            components.pipeline.clone(),
            components.search.clone(),
            config.mode,
            Duration::from_secs(config.article_delay_secs),
            config.search_limit,
        )))
}
