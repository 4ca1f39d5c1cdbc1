//! # Text inference capabilities
//!
//! This crate defines the capability interfaces the analysis pipeline calls into:
//! summarization, text generation, sentiment classification, and zero-shot
//! classification. Implementations live in sibling crates (e.g. `hf-inference`)
//! so the pipeline can swap real inference services for mocks in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Generation knobs forwarded to the underlying model.
///
/// `truncation` means only a bounded prefix of the input is fed to the model;
/// it is a cost/latency trade-off, not a correctness requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_length: u32,
    pub min_length: u32,
    pub num_beams: u32,
    pub truncation: bool,
}

impl GenerationParams {
    pub fn new(max_length: u32, min_length: u32, num_beams: u32) -> Self {
        Self {
            max_length,
            min_length,
            num_beams,
            truncation: true,
        }
    }
}

/// Abstractive summarization of a text body.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produces a summary whose length falls in the configured band.
    async fn summarize(&self, text: &str, params: &GenerationParams)
        -> Result<String, anyhow::Error>;
}

/// Free-form text generation from a prompt (text2text models).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for the prompt. Output is returned as the model produced
    /// it; callers trim if they need to.
    async fn generate(&self, prompt: &str, params: &GenerationParams)
        -> Result<String, anyhow::Error>;
}

/// Sentiment (text) classification.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Returns the model's highest-scoring raw label (e.g. `LABEL_0`).
    /// Label-to-meaning mapping is the caller's contract with the model.
    async fn classify(&self, text: &str) -> Result<String, anyhow::Error>;
}

/// Zero-shot classification against caller-supplied candidate labels.
#[async_trait]
pub trait ZeroShotClassifier: Send + Sync {
    /// Returns the single highest-scoring label out of `candidate_labels`.
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<String, anyhow::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_params_default_to_truncating_input() {
        let params = GenerationParams::new(120, 50, 5);
        assert_eq!(params.max_length, 120);
        assert_eq!(params.min_length, 50);
        assert_eq!(params.num_beams, 5);
        assert!(params.truncation);
    }
}
