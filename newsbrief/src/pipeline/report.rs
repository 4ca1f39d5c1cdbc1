//! The report: the complete, renderable result of processing one article.

use serde::{Deserialize, Serialize};

/// Overall tone of the article body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Negative,
    Neutral,
    Positive,
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Tone::Negative => "NEGATIVE",
            Tone::Neutral => "NEUTRAL",
            Tone::Positive => "POSITIVE",
        })
    }
}

/// Model outputs for one article. Produced only once the body is known to be
/// non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub generated_title: String,
    pub tone: Tone,
    pub category: String,
}

/// Article metadata joined with its analysis; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub url: String,
    pub original_title: String,
    pub authors: Vec<String>,
    pub published_at: Option<String>,
    pub analysis: AnalysisResult,
}

impl Report {
    /// Renders the report as plain text, before any transport escaping.
    /// Field order is fixed: Title, Published Date, Author, Summary,
    /// Category, Tone, then the source link.
    pub fn render_plain(&self) -> String {
        let authors = if self.authors.is_empty() {
            "Unknown".to_string()
        } else {
            self.authors.join(", ")
        };
        format!(
            "📰 News Summary:\n\
             📌 Title: {title}\n\
             📅 Published Date: {published}\n\
             👤 Author: {authors}\n\
             📝 Summary: {summary}\n\
             📂 Category: {category}\n\
             🎭 Tone: {tone}\n\
             \n\
             🔗 {url}",
            title = self.analysis.generated_title,
            published = self.published_at.as_deref().unwrap_or("Unknown"),
            authors = authors,
            summary = self.analysis.summary,
            category = self.analysis.category,
            tone = self.analysis.tone,
            url = self.url,
        )
    }
}
