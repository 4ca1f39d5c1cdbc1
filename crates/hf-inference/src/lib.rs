//! # Hugging Face Inference API client
//!
//! Implements the `inference` capability traits against the hosted Inference
//! API. One [`HfClient`] is shared by per-task wrappers ([`HfSummarizer`],
//! [`HfTextGenerator`], [`HfSentimentClassifier`], [`HfZeroShotClassifier`]),
//! each bound to one model id. The base URL is overridable so tests can point
//! the client at a local mock server.

use anyhow::Context;
use async_trait::async_trait;
use inference::{GenerationParams, SentimentClassifier, Summarizer, TextGenerator, ZeroShotClassifier};
use serde_json::{json, Value};
use tracing::debug;

/// Default Inference API endpoint.
pub const HF_API_BASE: &str = "https://api-inference.huggingface.co";

/// Masks an API token for safe logging: first 4 chars + "***" + last 2 chars.
/// Short tokens are fully masked so no part of them leaks.
pub fn mask_token(token: &str) -> String {
    if token.len() <= 8 {
        return "***".to_string();
    }
    format!("{}***{}", &token[..4], &token[token.len() - 2..])
}

/// Shared HTTP client for the Inference API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HfClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl HfClient {
    /// Builds a client for the hosted API. An empty key sends unauthenticated
    /// requests (heavily rate limited by the upstream service).
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, HF_API_BASE)
    }

    /// Builds a client against a custom endpoint (proxies, mock servers).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// POSTs a task payload to `{base}/models/{model}` and returns the raw
    /// JSON response. Non-2xx statuses become errors carrying the body text.
    async fn post(&self, model: &str, body: &Value) -> Result<Value, anyhow::Error> {
        let url = format!("{}/models/{}", self.base_url.trim_end_matches('/'), model);
        debug!(model = %model, api_key = %mask_token(&self.api_key), "inference request");

        let mut request = self.http.post(&url).json(body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("inference request to {} failed", model))?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("inference request to {} returned {}: {}", model, status, detail);
        }
        response
            .json()
            .await
            .with_context(|| format!("invalid JSON from {}", model))
    }
}

/// Serializes generation knobs the way the task endpoints expect them.
fn generation_parameters(params: &GenerationParams) -> Value {
    json!({
        "max_length": params.max_length,
        "min_length": params.min_length,
        "num_beams": params.num_beams,
        "truncation": params.truncation,
    })
}

/// Pulls `field` out of the first element of a task response list.
fn first_field(value: &Value, field: &str) -> Result<String, anyhow::Error> {
    value
        .get(0)
        .and_then(|entry| entry.get(field))
        .and_then(Value::as_str)
        .map(str::to_string)
        .with_context(|| format!("malformed inference response: missing {}", field))
}

/// Top label of a text-classification response. The API returns either a flat
/// list of `{label, score}` entries or one list per input; both are sorted by
/// descending score, so the first entry is the winner.
fn top_label(value: &Value) -> Result<String, anyhow::Error> {
    let entries = match value.get(0) {
        Some(first) if first.is_array() => first,
        _ => value,
    };
    entries
        .get(0)
        .and_then(|entry| entry.get("label"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .context("malformed classification response: missing label")
}

/// Summarization task wrapper (e.g. `facebook/bart-large-cnn`).
#[derive(Debug, Clone)]
pub struct HfSummarizer {
    client: HfClient,
    model: String,
}

impl HfSummarizer {
    pub fn new(client: HfClient, model: impl Into<String>) -> Self {
        Self { client, model: model.into() }
    }
}

#[async_trait]
impl Summarizer for HfSummarizer {
    async fn summarize(&self, text: &str, params: &GenerationParams)
        -> Result<String, anyhow::Error>
    {
        let body = json!({
            "inputs": text,
            "parameters": generation_parameters(params),
            "options": {"wait_for_model": true},
        });
        let response = self.client.post(&self.model, &body).await?;
        first_field(&response, "summary_text")
    }
}

/// Text2text generation task wrapper (e.g. `google/pegasus-xsum`).
#[derive(Debug, Clone)]
pub struct HfTextGenerator {
    client: HfClient,
    model: String,
}

impl HfTextGenerator {
    pub fn new(client: HfClient, model: impl Into<String>) -> Self {
        Self { client, model: model.into() }
    }
}

#[async_trait]
impl TextGenerator for HfTextGenerator {
    async fn generate(&self, prompt: &str, params: &GenerationParams)
        -> Result<String, anyhow::Error>
    {
        let body = json!({
            "inputs": prompt,
            "parameters": generation_parameters(params),
            "options": {"wait_for_model": true},
        });
        let response = self.client.post(&self.model, &body).await?;
        first_field(&response, "generated_text")
    }
}

/// Text-classification task wrapper (e.g. `cardiffnlp/twitter-roberta-base-sentiment`).
#[derive(Debug, Clone)]
pub struct HfSentimentClassifier {
    client: HfClient,
    model: String,
}

impl HfSentimentClassifier {
    pub fn new(client: HfClient, model: impl Into<String>) -> Self {
        Self { client, model: model.into() }
    }
}

#[async_trait]
impl SentimentClassifier for HfSentimentClassifier {
    async fn classify(&self, text: &str) -> Result<String, anyhow::Error> {
        let body = json!({
            "inputs": text,
            "options": {"wait_for_model": true},
        });
        let response = self.client.post(&self.model, &body).await?;
        top_label(&response)
    }
}

/// Zero-shot classification task wrapper (e.g. `facebook/bart-large-mnli`).
#[derive(Debug, Clone)]
pub struct HfZeroShotClassifier {
    client: HfClient,
    model: String,
}

impl HfZeroShotClassifier {
    pub fn new(client: HfClient, model: impl Into<String>) -> Self {
        Self { client, model: model.into() }
    }
}

#[async_trait]
impl ZeroShotClassifier for HfZeroShotClassifier {
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<String, anyhow::Error> {
        let body = json!({
            "inputs": text,
            "parameters": {"candidate_labels": candidate_labels},
            "options": {"wait_for_model": true},
        });
        let response = self.client.post(&self.model, &body).await?;
        response
            .get("labels")
            .and_then(|labels| labels.get(0))
            .and_then(Value::as_str)
            .map(str::to_string)
            .context("malformed zero-shot response: missing labels")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_token_hides_short_tokens_entirely() {
        assert_eq!(mask_token(""), "***");
        assert_eq!(mask_token("hf_short"), "***");
    }

    #[test]
    fn mask_token_keeps_head_and_tail_of_long_tokens() {
        assert_eq!(mask_token("hf_abcdefghijkl"), "hf_a***kl");
    }

    #[test]
    fn top_label_handles_flat_and_nested_responses() {
        let flat = json!([{"label": "LABEL_2", "score": 0.9}, {"label": "LABEL_0", "score": 0.1}]);
        assert_eq!(top_label(&flat).unwrap(), "LABEL_2");

        let nested = json!([[{"label": "LABEL_1", "score": 0.8}, {"label": "LABEL_2", "score": 0.2}]]);
        assert_eq!(top_label(&nested).unwrap(), "LABEL_1");
    }

    #[test]
    fn top_label_rejects_empty_responses() {
        assert!(top_label(&json!([])).is_err());
    }

    #[tokio::test]
    async fn summarize_posts_inputs_and_reads_summary_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/facebook/bart-large-cnn")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"summary_text": "Markets rallied."}]"#)
            .create_async()
            .await;

        let client = HfClient::with_base_url("test-key", server.url());
        let summarizer = HfSummarizer::new(client, "facebook/bart-large-cnn");
        let summary = summarizer
            .summarize("long article body", &GenerationParams::new(120, 50, 5))
            .await
            .unwrap();

        assert_eq!(summary, "Markets rallied.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn generate_reads_generated_text() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/google/pegasus-xsum")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"generated_text": " Tech Stocks Soar "}]"#)
            .create_async()
            .await;

        let client = HfClient::with_base_url("", server.url());
        let generator = HfTextGenerator::new(client, "google/pegasus-xsum");
        let title = generator
            .generate("Write a title", &GenerationParams::new(20, 7, 8))
            .await
            .unwrap();

        // The wrapper returns the model output untouched; trimming is the caller's job.
        assert_eq!(title, " Tech Stocks Soar ");
    }

    #[tokio::test]
    async fn sentiment_returns_top_label_from_nested_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/cardiffnlp/twitter-roberta-base-sentiment")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[[{"label": "LABEL_0", "score": 0.7}, {"label": "LABEL_1", "score": 0.3}]]"#)
            .create_async()
            .await;

        let client = HfClient::with_base_url("", server.url());
        let classifier = HfSentimentClassifier::new(client, "cardiffnlp/twitter-roberta-base-sentiment");
        assert_eq!(classifier.classify("gloomy news").await.unwrap(), "LABEL_0");
    }

    #[tokio::test]
    async fn zero_shot_returns_highest_scoring_label() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/facebook/bart-large-mnli")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"sequence": "s", "labels": ["Business", "Technology"], "scores": [0.8, 0.2]}"#,
            )
            .create_async()
            .await;

        let client = HfClient::with_base_url("", server.url());
        let classifier = HfZeroShotClassifier::new(client, "facebook/bart-large-mnli");
        let label = classifier
            .classify("markets rally", &["Business", "Technology"])
            .await
            .unwrap();
        assert_eq!(label, "Business");
    }

    #[tokio::test]
    async fn non_success_status_becomes_error_with_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/facebook/bart-large-cnn")
            .with_status(503)
            .with_body("model loading")
            .create_async()
            .await;

        let client = HfClient::with_base_url("", server.url());
        let summarizer = HfSummarizer::new(client, "facebook/bart-large-cnn");
        let err = summarizer
            .summarize("body", &GenerationParams::new(120, 50, 5))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("503"));
    }
}
