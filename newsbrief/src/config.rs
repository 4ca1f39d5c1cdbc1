//! Bot configuration, loaded from environment variables.

use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Which kind of article reference inbound messages carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotMode {
    /// Messages are article URLs.
    Link,
    /// Messages are category keywords resolved via search.
    Category,
}

impl FromStr for BotMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "link" => Ok(BotMode::Link),
            "category" => Ok(BotMode::Category),
            other => anyhow::bail!("invalid BOT_MODE '{}' (expected 'link' or 'category')", other),
        }
    }
}

impl std::fmt::Display for BotMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BotMode::Link => "link",
            BotMode::Category => "category",
        })
    }
}

/// Bot configuration from environment variables.
pub struct BotConfig {
    pub bot_token: String,
    pub mode: BotMode,
    pub log_file: String,
    /// GNews API key; required only in category mode.
    pub gnews_api_key: String,
    /// Hugging Face API key; empty sends unauthenticated requests.
    pub hf_api_key: String,
    /// Optional Inference API base URL override (tests point this at a mock).
    pub hf_base_url: Option<String>,
    /// Optional GNews base URL override (tests point this at a mock).
    pub gnews_base_url: Option<String>,
    /// Optional Telegram Bot API base URL override.
    /// Env: `TELEGRAM_API_URL` or `TELOXIDE_API_URL`.
    pub telegram_api_url: Option<String>,
    pub summarizer_model: String,
    pub title_model: String,
    pub sentiment_model: String,
    pub zero_shot_model: String,
    pub search_lang: String,
    pub search_country: String,
    pub search_limit: usize,
    /// Seconds slept before each category-mode article.
    pub article_delay_secs: u64,
}

impl BotConfig {
    /// Loads configuration from the environment. If `token` is provided it
    /// overrides `BOT_TOKEN`.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let mode = env::var("BOT_MODE")
            .unwrap_or_else(|_| "link".to_string())
            .parse()?;
        let log_file =
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/newsbrief.log".to_string());
        let gnews_api_key = env::var("GNEWS_API_KEY").unwrap_or_default();
        let hf_api_key = env::var("HF_API_KEY").unwrap_or_default();
        let hf_base_url = env::var("HF_BASE_URL").ok();
        let gnews_base_url = env::var("GNEWS_BASE_URL").ok();
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let summarizer_model = env::var("SUMMARIZER_MODEL")
            .unwrap_or_else(|_| "facebook/bart-large-cnn".to_string());
        let title_model =
            env::var("TITLE_MODEL").unwrap_or_else(|_| "google/pegasus-xsum".to_string());
        let sentiment_model = env::var("SENTIMENT_MODEL")
            .unwrap_or_else(|_| "cardiffnlp/twitter-roberta-base-sentiment".to_string());
        let zero_shot_model = env::var("ZERO_SHOT_MODEL")
            .unwrap_or_else(|_| "facebook/bart-large-mnli".to_string());
        let search_lang = env::var("SEARCH_LANG").unwrap_or_else(|_| "en".to_string());
        let search_country = env::var("SEARCH_COUNTRY").unwrap_or_else(|_| "us".to_string());
        let search_limit = env::var("SEARCH_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3);
        let article_delay_secs = env::var("ARTICLE_DELAY_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);

        Ok(Self {
            bot_token,
            mode,
            log_file,
            gnews_api_key,
            hf_api_key,
            hf_base_url,
            gnews_base_url,
            telegram_api_url,
            summarizer_model,
            title_model,
            sentiment_model,
            zero_shot_model,
            search_lang,
            search_country,
            search_limit,
            article_delay_secs,
        })
    }

    /// Checks cross-field requirements that `load` cannot.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.is_empty() {
            anyhow::bail!("BOT_TOKEN must not be empty");
        }
        if self.mode == BotMode::Category && self.gnews_api_key.is_empty() {
            anyhow::bail!("GNEWS_API_KEY must be set in category mode");
        }
        if self.search_limit == 0 {
            anyhow::bail!("SEARCH_LIMIT must be at least 1");
        }
        Ok(())
    }
}
