//! # Analysis pipeline
//!
//! The ordered stage chain that turns an article URL into a [`Report`]:
//! extract → summarize → generate title → detect tone → categorize. The
//! orchestrator short-circuits at the first failing stage; no downstream
//! stage runs and no partial report is ever emitted.

use std::sync::Arc;

use inference::{GenerationParams, SentimentClassifier, Summarizer, TextGenerator, ZeroShotClassifier};
use newswire::ArticleExtractor;
use tracing::{info, instrument};

pub mod error;
pub mod progress;
pub mod report;

pub use error::{PipelineError, Stage};
pub use progress::{NoProgress, Phase, ProgressReporter, ProgressSink, ProgressTicket};
pub use report::{AnalysisResult, Report, Tone};

/// Fixed label set for zero-shot categorization.
pub const CATEGORY_LABELS: [&str; 7] = [
    "Politics",
    "Technology",
    "Sports",
    "Health",
    "Business",
    "Science",
    "World",
];

/// Only this many leading characters of the body are scored for tone.
const TONE_SCORING_CHARS: usize = 512;

/// Summarization length band and beam count.
pub fn summary_params() -> GenerationParams {
    GenerationParams::new(120, 50, 5)
}

/// Title generation length band and beam count.
pub fn title_params() -> GenerationParams {
    GenerationParams::new(20, 7, 8)
}

/// The pipeline orchestrator. Capabilities are injected as trait objects so
/// tests and alternate providers can swap in without touching the chain.
pub struct ArticlePipeline {
    extractor: Arc<dyn ArticleExtractor>,
    summarizer: Arc<dyn Summarizer>,
    title_generator: Arc<dyn TextGenerator>,
    sentiment: Arc<dyn SentimentClassifier>,
    categorizer: Arc<dyn ZeroShotClassifier>,
    summary_params: GenerationParams,
    title_params: GenerationParams,
}

impl ArticlePipeline {
    pub fn new(
        extractor: Arc<dyn ArticleExtractor>,
        summarizer: Arc<dyn Summarizer>,
        title_generator: Arc<dyn TextGenerator>,
        sentiment: Arc<dyn SentimentClassifier>,
        categorizer: Arc<dyn ZeroShotClassifier>,
    ) -> Self {
        Self {
            extractor,
            summarizer,
            title_generator,
            sentiment,
            categorizer,
            summary_params: summary_params(),
            title_params: title_params(),
        }
    }

    /// Runs the full stage chain for one article, reporting each phase to
    /// `progress` before the stage executes. The first failing stage ends the
    /// run; its stage tag and cause surface verbatim in the error.
    #[instrument(skip(self, progress))]
    pub async fn run(
        &self,
        url: &str,
        progress: &dyn ProgressSink,
    ) -> Result<Report, PipelineError> {
        progress.phase(Phase::Extracting).await;
        let article = self
            .extractor
            .extract(url)
            .await
            .map_err(|e| PipelineError::Extraction(e.to_string()))?;
        if article.body.trim().is_empty() {
            return Err(PipelineError::Extraction(
                "no content found in the article".to_string(),
            ));
        }

        progress.phase(Phase::Summarizing).await;
        let summary = self
            .summarizer
            .summarize(&article.body, &self.summary_params)
            .await
            .map_err(|e| PipelineError::Summarization(e.to_string()))?;

        progress.phase(Phase::GeneratingTitle).await;
        let generated_title = self.generate_title(&summary).await?;

        // Tone scores the raw body, not the summary; it has no data dependency
        // on the summary chain but runs after it to keep the chain linear.
        progress.phase(Phase::AnalyzingTone).await;
        let tone = self.detect_tone(&article.body).await?;

        progress.phase(Phase::Classifying).await;
        let category = self
            .categorizer
            .classify(&summary, &CATEGORY_LABELS)
            .await
            .map_err(|e| PipelineError::Categorization(e.to_string()))?;

        info!(url = %url, category = %category, tone = %tone, "article analyzed");

        Ok(Report {
            url: url.to_string(),
            original_title: article.title,
            authors: article.authors,
            published_at: article.published_at,
            analysis: AnalysisResult {
                summary,
                generated_title,
                tone,
                category,
            },
        })
    }

    async fn generate_title(&self, summary: &str) -> Result<String, PipelineError> {
        let prompt = format!("Write a short, catchy title for this news: {}", summary);
        let title = self
            .title_generator
            .generate(&prompt, &self.title_params)
            .await
            .map_err(|e| PipelineError::TitleGeneration(e.to_string()))?;
        Ok(title.trim().to_string())
    }

    async fn detect_tone(&self, body: &str) -> Result<Tone, PipelineError> {
        let head: String = body.chars().take(TONE_SCORING_CHARS).collect();
        let label = self
            .sentiment
            .classify(&head)
            .await
            .map_err(|e| PipelineError::ToneAnalysis(e.to_string()))?;
        // Positional mapping over the model's raw label set. This is an
        // external contract: if the underlying label order ever changes, the
        // mapping silently mis-assigns tones.
        Ok(match label.as_str() {
            "LABEL_0" => Tone::Negative,
            "LABEL_1" => Tone::Neutral,
            _ => Tone::Positive,
        })
    }
}
