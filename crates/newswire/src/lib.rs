//! # Article acquisition
//!
//! Everything that turns user input into raw article material: fetching and
//! parsing an article page into structured text ([`extract`]), and resolving a
//! topic keyword into candidate article URLs via the GNews API ([`search`]).
//! Both capabilities sit behind traits so the bot can mock them in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod extract;
pub mod search;

pub use extract::HttpArticleExtractor;
pub use search::{FoundArticle, GNewsClient, GNEWS_API_BASE};

/// Structured article text as parsed from a page.
///
/// An empty `body` is a valid parse result; whether it is acceptable is the
/// caller's decision, not the extractor's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedArticle {
    /// Page title; "Unknown Title" when the page carries none.
    pub title: String,
    /// Author names in page order; may be empty.
    pub authors: Vec<String>,
    /// Publication timestamp as the page states it, unparsed.
    pub published_at: Option<String>,
    /// Concatenated article paragraphs.
    pub body: String,
}

/// Fetches a URL and parses it into an [`ExtractedArticle`].
#[async_trait]
pub trait ArticleExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<ExtractedArticle, anyhow::Error>;
}

/// Resolves a topic keyword into candidate articles, best match first.
#[async_trait]
pub trait NewsSearch: Send + Sync {
    async fn search(&self, keyword: &str) -> Result<Vec<FoundArticle>, anyhow::Error>;
}
