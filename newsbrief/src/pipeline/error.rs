//! Stage-tagged pipeline errors.

use thiserror::Error;

/// One named unit of the pipeline, the failure identity of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Summarize,
    Title,
    Tone,
    Category,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Extract => "extract",
            Stage::Summarize => "summarize",
            Stage::Title => "title",
            Stage::Tone => "tone",
            Stage::Category => "category",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of one pipeline stage, carrying the underlying cause verbatim.
/// A mid-pipeline failure discards any partial stage results; there is no
/// partial report.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to extract article: {0}")]
    Extraction(String),

    #[error("Error in summarization: {0}")]
    Summarization(String),

    #[error("Error in title generation: {0}")]
    TitleGeneration(String),

    #[error("Error in sentiment analysis: {0}")]
    ToneAnalysis(String),

    #[error("Error in categorization: {0}")]
    Categorization(String),
}

impl PipelineError {
    /// The stage this failure is tagged with.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Extraction(_) => Stage::Extract,
            PipelineError::Summarization(_) => Stage::Summarize,
            PipelineError::TitleGeneration(_) => Stage::Title,
            PipelineError::ToneAnalysis(_) => Stage::Tone,
            PipelineError::Categorization(_) => Stage::Category,
        }
    }

    /// The underlying cause string.
    pub fn cause(&self) -> &str {
        match self {
            PipelineError::Extraction(cause)
            | PipelineError::Summarization(cause)
            | PipelineError::TitleGeneration(cause)
            | PipelineError::ToneAnalysis(cause)
            | PipelineError::Categorization(cause) => cause,
        }
    }
}
