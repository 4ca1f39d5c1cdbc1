//! GNews search client: keyword → candidate article URLs.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::NewsSearch;

/// Default GNews API endpoint.
pub const GNEWS_API_BASE: &str = "https://gnews.io/api/v4";

/// One search hit. The API returns more fields; only what the bot consumes is
/// kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FoundArticle {
    #[serde(default)]
    pub title: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<FoundArticle>,
}

/// GNews `/search` client with fixed language/country/limit settings.
#[derive(Debug, Clone)]
pub struct GNewsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    lang: String,
    country: String,
    limit: usize,
}

impl GNewsClient {
    /// Client against the public API; defaults to English, US, 3 results.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, GNEWS_API_BASE)
    }

    /// Client against a custom endpoint (tests point this at a mock server).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            lang: "en".to_string(),
            country: "us".to_string(),
            limit: 3,
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

#[async_trait]
impl NewsSearch for GNewsClient {
    /// Resolves `keyword` to at most `limit` articles. An empty result set is
    /// an error so callers report it the same way as transport failures.
    async fn search(&self, keyword: &str) -> Result<Vec<FoundArticle>, anyhow::Error> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let limit = self.limit.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", keyword),
                ("lang", self.lang.as_str()),
                ("country", self.country.as_str()),
                ("max", limit.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let mut parsed: SearchResponse = response.json().await?;
        if parsed.articles.is_empty() {
            anyhow::bail!("No articles found for this category.");
        }
        parsed.articles.truncate(self.limit);
        info!(keyword = %keyword, hits = parsed.articles.len(), "news search resolved");
        Ok(parsed.articles)
    }
}
