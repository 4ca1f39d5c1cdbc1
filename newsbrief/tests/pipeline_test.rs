//! Integration tests for [`newsbrief::pipeline::ArticlePipeline`].
//!
//! Covers: the full stage chain on a healthy article, the empty-body guard,
//! short-circuiting at each failing stage (verified via call counts on the
//! stage mocks), the tone label mapping and its 512-char scoring bound, and
//! the phase sequence reported while the chain advances.

use std::sync::Arc;

use newsbrief::pipeline::{
    ArticlePipeline, NoProgress, Phase, Stage, Tone, CATEGORY_LABELS,
};

use mocks::{MockCategorizer, MockExtractor, MockSentiment, MockSummarizer, MockTitleGenerator, RecordingSink};

struct Fixture {
    extractor: Arc<MockExtractor>,
    summarizer: Arc<MockSummarizer>,
    title_generator: Arc<MockTitleGenerator>,
    sentiment: Arc<MockSentiment>,
    categorizer: Arc<MockCategorizer>,
    pipeline: ArticlePipeline,
}

fn fixture_with(
    extractor: MockExtractor,
    summarizer: MockSummarizer,
    title_generator: MockTitleGenerator,
    sentiment: MockSentiment,
    categorizer: MockCategorizer,
) -> Fixture {
    let extractor = Arc::new(extractor);
    let summarizer = Arc::new(summarizer);
    let title_generator = Arc::new(title_generator);
    let sentiment = Arc::new(sentiment);
    let categorizer = Arc::new(categorizer);
    let pipeline = ArticlePipeline::new(
        extractor.clone(),
        summarizer.clone(),
        title_generator.clone(),
        sentiment.clone(),
        categorizer.clone(),
    );
    Fixture {
        extractor,
        summarizer,
        title_generator,
        sentiment,
        categorizer,
        pipeline,
    }
}

fn fixture() -> Fixture {
    fixture_with(
        MockExtractor::new(),
        MockSummarizer::default(),
        MockTitleGenerator::default(),
        MockSentiment::default(),
        MockCategorizer::default(),
    )
}

/// **Test: A healthy article produces a complete report.**
///
/// **Setup:** All stage mocks succeed.
/// **Action:** `pipeline.run(url, NoProgress)`.
/// **Expected:** Report carries metadata plus all four analysis fields; every
/// stage is called exactly once.
#[tokio::test]
async fn healthy_article_produces_complete_report() {
    let f = fixture();
    let report = f
        .pipeline
        .run("https://example.com/markets", &NoProgress)
        .await
        .unwrap();

    assert_eq!(report.url, "https://example.com/markets");
    assert_eq!(report.original_title, "Stocks climb");
    assert_eq!(report.authors, vec!["A. Reporter"]);
    assert_eq!(report.published_at.as_deref(), Some("2024-03-01"));
    assert_eq!(report.analysis.summary, "Markets rally as tech stocks surge");
    assert_eq!(report.analysis.generated_title, "Tech Stocks Soar");
    assert_eq!(report.analysis.tone, Tone::Positive);
    assert_eq!(report.analysis.category, "Business");

    assert_eq!(f.extractor.call_count(), 1);
    assert_eq!(f.summarizer.call_count(), 1);
    assert_eq!(f.title_generator.call_count(), 1);
    assert_eq!(f.sentiment.call_count(), 1);
    assert_eq!(f.categorizer.call_count(), 1);
}

/// **Test: An empty body is a terminal extract failure.**
///
/// **Setup:** Extractor succeeds but returns an empty body.
/// **Action:** `pipeline.run`.
/// **Expected:** Extraction failure with the no-content cause; no downstream
/// stage is called.
#[tokio::test]
async fn empty_body_short_circuits_after_extract() {
    let f = fixture_with(
        MockExtractor::empty_body(),
        MockSummarizer::default(),
        MockTitleGenerator::default(),
        MockSentiment::default(),
        MockCategorizer::default(),
    );
    let err = f.pipeline.run("https://example.com/empty", &NoProgress).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Extract);
    assert!(err.cause().contains("no content found"));
    assert_eq!(f.extractor.call_count(), 1);
    assert_eq!(f.summarizer.call_count(), 0);
    assert_eq!(f.title_generator.call_count(), 0);
    assert_eq!(f.sentiment.call_count(), 0);
    assert_eq!(f.categorizer.call_count(), 0);
}

/// **Test: An extraction fault carries the underlying message.**
#[tokio::test]
async fn extraction_fault_surfaces_underlying_cause() {
    let f = fixture_with(
        MockExtractor::failing_all(),
        MockSummarizer::default(),
        MockTitleGenerator::default(),
        MockSentiment::default(),
        MockCategorizer::default(),
    );
    let err = f.pipeline.run("https://example.com/down", &NoProgress).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Extract);
    assert_eq!(err.cause(), "connection refused");
    assert_eq!(f.summarizer.call_count(), 0);
}

/// **Test: A summarization failure stops the chain before title/tone/category.**
#[tokio::test]
async fn summarize_failure_short_circuits_downstream_stages() {
    let f = fixture_with(
        MockExtractor::new(),
        MockSummarizer {
            fail: true,
            ..MockSummarizer::default()
        },
        MockTitleGenerator::default(),
        MockSentiment::default(),
        MockCategorizer::default(),
    );
    let err = f.pipeline.run("https://example.com/a", &NoProgress).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Summarize);
    assert_eq!(f.extractor.call_count(), 1);
    assert_eq!(f.summarizer.call_count(), 1);
    assert_eq!(f.title_generator.call_count(), 0);
    assert_eq!(f.sentiment.call_count(), 0);
    assert_eq!(f.categorizer.call_count(), 0);
}

/// **Test: A title failure stops the chain before tone and category.**
#[tokio::test]
async fn title_failure_short_circuits_downstream_stages() {
    let f = fixture_with(
        MockExtractor::new(),
        MockSummarizer::default(),
        MockTitleGenerator {
            fail: true,
            ..MockTitleGenerator::default()
        },
        MockSentiment::default(),
        MockCategorizer::default(),
    );
    let err = f.pipeline.run("https://example.com/a", &NoProgress).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Title);
    assert_eq!(f.sentiment.call_count(), 0);
    assert_eq!(f.categorizer.call_count(), 0);
}

/// **Test: A tone failure stops the chain before category.**
#[tokio::test]
async fn tone_failure_short_circuits_categorization() {
    let f = fixture_with(
        MockExtractor::new(),
        MockSummarizer::default(),
        MockTitleGenerator::default(),
        MockSentiment {
            fail: true,
            ..MockSentiment::default()
        },
        MockCategorizer::default(),
    );
    let err = f.pipeline.run("https://example.com/a", &NoProgress).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Tone);
    assert_eq!(f.title_generator.call_count(), 1);
    assert_eq!(f.categorizer.call_count(), 0);
}

/// **Test: A categorization failure is tagged with the category stage.**
#[tokio::test]
async fn categorization_failure_is_tagged_last() {
    let f = fixture_with(
        MockExtractor::new(),
        MockSummarizer::default(),
        MockTitleGenerator::default(),
        MockSentiment::default(),
        MockCategorizer {
            fail: true,
            ..MockCategorizer::default()
        },
    );
    let err = f.pipeline.run("https://example.com/a", &NoProgress).await.unwrap_err();
    assert_eq!(err.stage(), Stage::Category);
}

/// **Test: Raw sentiment labels map positionally onto tones.**
///
/// LABEL_0 → Negative, LABEL_1 → Neutral, anything else → Positive. The
/// catch-all arm is part of the upstream contract and includes labels that
/// are not in the expected set at all.
#[tokio::test]
async fn sentiment_labels_map_positionally_onto_tones() {
    for (label, expected) in [
        ("LABEL_0", Tone::Negative),
        ("LABEL_1", Tone::Neutral),
        ("LABEL_2", Tone::Positive),
        ("surprise", Tone::Positive),
    ] {
        let f = fixture_with(
            MockExtractor::new(),
            MockSummarizer::default(),
            MockTitleGenerator::default(),
            MockSentiment::with_label(label),
            MockCategorizer::default(),
        );
        let report = f.pipeline.run("https://example.com/a", &NoProgress).await.unwrap();
        assert_eq!(report.analysis.tone, expected, "label {}", label);
    }
}

/// **Test: Only the first 512 characters of the body are scored for tone.**
#[tokio::test]
async fn tone_scores_a_bounded_prefix_of_the_body() {
    let body = "x".repeat(600);
    let f = fixture_with(
        MockExtractor::with_body(&body),
        MockSummarizer::default(),
        MockTitleGenerator::default(),
        MockSentiment::default(),
        MockCategorizer::default(),
    );
    f.pipeline.run("https://example.com/a", &NoProgress).await.unwrap();

    let scored = f.sentiment.last_input.lock().unwrap().clone().unwrap();
    assert_eq!(scored.chars().count(), 512);

    // The summarizer saw the full body, not the truncated prefix.
    let summarized = f.summarizer.last_input.lock().unwrap().clone().unwrap();
    assert_eq!(summarized, body);
}

/// **Test: The title prompt is templated from the summary, output trimmed.**
#[tokio::test]
async fn title_is_prompted_from_summary_and_trimmed() {
    let f = fixture();
    let report = f.pipeline.run("https://example.com/a", &NoProgress).await.unwrap();

    let prompt = f.title_generator.last_prompt.lock().unwrap().clone().unwrap();
    assert_eq!(
        prompt,
        "Write a short, catchy title for this news: Markets rally as tech stocks surge"
    );
    // The mock pads its output with spaces; the pipeline trims them.
    assert_eq!(report.analysis.generated_title, "Tech Stocks Soar");
}

/// **Test: Categorization is zero-shot against the fixed label set.**
#[tokio::test]
async fn categorization_uses_the_fixed_label_set() {
    let f = fixture();
    f.pipeline.run("https://example.com/a", &NoProgress).await.unwrap();

    let labels = f.categorizer.last_labels.lock().unwrap().clone();
    assert_eq!(labels, CATEGORY_LABELS.map(String::from).to_vec());
}

/// **Test: Phases are reported in stage order, before each stage runs.**
#[tokio::test]
async fn phases_are_reported_in_stage_order() {
    let f = fixture();
    let sink = RecordingSink::default();
    f.pipeline.run("https://example.com/a", &sink).await.unwrap();

    assert_eq!(
        sink.recorded(),
        vec![
            Phase::Extracting,
            Phase::Summarizing,
            Phase::GeneratingTitle,
            Phase::AnalyzingTone,
            Phase::Classifying,
        ]
    );
}

/// **Test: A failing stage ends phase reporting at that stage.**
#[tokio::test]
async fn failed_stage_ends_phase_reporting() {
    let f = fixture_with(
        MockExtractor::new(),
        MockSummarizer {
            fail: true,
            ..MockSummarizer::default()
        },
        MockTitleGenerator::default(),
        MockSentiment::default(),
        MockCategorizer::default(),
    );
    let sink = RecordingSink::default();
    f.pipeline.run("https://example.com/a", &sink).await.unwrap_err();

    assert_eq!(sink.recorded(), vec![Phase::Extracting, Phase::Summarizing]);
}
