//! Generic article page extractor: reqwest fetch + selector-based parse.

use async_trait::async_trait;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use crate::{ArticleExtractor, ExtractedArticle};

const UNKNOWN_TITLE: &str = "Unknown Title";

/// Extractor for arbitrary news pages. Prefers `article` paragraph content and
/// falls back to the whole document's paragraphs for pages without an
/// `article` element.
#[derive(Debug, Clone)]
pub struct HttpArticleExtractor {
    http: reqwest::Client,
}

impl HttpArticleExtractor {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Default for HttpArticleExtractor {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

#[async_trait]
impl ArticleExtractor for HttpArticleExtractor {
    async fn extract(&self, url: &str) -> Result<ExtractedArticle, anyhow::Error> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;
        let article = parse_article(&html);
        debug!(
            url = %url,
            title = %article.title,
            authors = article.authors.len(),
            body_len = article.body.len(),
            "article extracted"
        );
        Ok(article)
    }
}

/// Parses a fetched page. Synchronous on purpose: `scraper::Html` is not
/// `Send` and must not live across an await point.
fn parse_article(html: &str) -> ExtractedArticle {
    let document = Html::parse_document(html);

    let title = meta_content(&document, "meta[property='og:title']")
        .or_else(|| first_text(&document, "h1"))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

    let mut authors = jsonld_authors(&document);
    if authors.is_empty() {
        if let Some(author) = meta_content(&document, "meta[name='author']") {
            if !author.is_empty() {
                authors.push(author);
            }
        }
    }

    let published_at = jsonld_date(&document)
        .or_else(|| meta_content(&document, "meta[property='article:published_time']"))
        .filter(|d| !d.is_empty());

    ExtractedArticle {
        title,
        authors,
        published_at,
        body: paragraphs(&document),
    }
}

/// Joins the page's article paragraphs with blank lines.
fn paragraphs(document: &Html) -> String {
    let in_article = collect_paragraphs(document, "article p");
    let paragraphs = if in_article.is_empty() {
        collect_paragraphs(document, "p")
    } else {
        in_article
    };
    paragraphs.join("\n\n")
}

fn collect_paragraphs(document: &Html, selector: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };
    document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
}

/// Author names from JSON-LD metadata: `author` may be an object, a list of
/// objects, or a bare string.
fn jsonld_authors(document: &Html) -> Vec<String> {
    let mut authors = Vec::new();
    for json in jsonld_blocks(document) {
        match json.get("author") {
            Some(Value::Array(entries)) => {
                for entry in entries {
                    if let Some(name) = entry.get("name").and_then(Value::as_str) {
                        authors.push(name.trim().to_string());
                    }
                }
            }
            Some(Value::Object(obj)) => {
                if let Some(name) = obj.get("name").and_then(Value::as_str) {
                    authors.push(name.trim().to_string());
                }
            }
            Some(Value::String(name)) => authors.push(name.trim().to_string()),
            _ => {}
        }
    }
    authors
}

fn jsonld_date(document: &Html) -> Option<String> {
    jsonld_blocks(document)
        .into_iter()
        .find_map(|json| {
            json.get("datePublished")
                .and_then(Value::as_str)
                .map(|date| date.trim().to_string())
        })
}

fn jsonld_blocks(document: &Html) -> Vec<Value> {
    let Ok(selector) = Selector::parse("script[type='application/ld+json']") else {
        return Vec::new();
    };
    document
        .select(&selector)
        .filter_map(|script| {
            serde_json::from_str(script.text().collect::<String>().trim()).ok()
        })
        .collect()
}
