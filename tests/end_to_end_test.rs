//! End-to-end report generation over a fixed 21-respondent survey
//!
//! Covers the full pipeline: snapshot filtering, scoring, classification,
//! recommendations, layout and the PDF bytes.

use std::sync::Arc;
use std::time::Duration;
use usability_core::classification::RemoteFewShotClassifier;
use usability_core::report::{BarChartRenderer, SectionKind, StaticCharts};
use usability_core::{
    AggregateOutcome, Category, EngineConfig, HeuristicClassifier, Sentiment, UsabilityAnalyzer,
    UsabilityBand,
};

mod common;
use common::{
    expected_mean, generated_at, snapshot, survey, ScriptedBackend, COMMENTED, RESPONDENTS, SCORES,
};

fn heuristic_analyzer() -> UsabilityAnalyzer {
    UsabilityAnalyzer::with_classifier(
        EngineConfig::default(),
        Arc::new(HeuristicClassifier::with_category_lookup()),
    )
}

#[tokio::test]
async fn test_known_mean_and_band() {
    let report = heuristic_analyzer().analyze(&survey(), &snapshot()).await;

    let AggregateOutcome::Scored(aggregate) = &report.aggregate else {
        panic!("expected a scored aggregate, got {:?}", report.aggregate);
    };
    assert_eq!(aggregate.respondents, RESPONDENTS.len());
    assert!((aggregate.mean - expected_mean()).abs() < 1e-9);
    assert!((aggregate.mean - 70.476).abs() < 1e-3);
    assert_eq!(aggregate.band, UsabilityBand::Acceptable);
    assert_eq!(aggregate.min, 10.0);
    assert_eq!(aggregate.max, 100.0);
    assert_eq!(aggregate.histogram, [0, 1, 1, 1, 0, 1, 5, 3, 4, 5]);

    let scores: Vec<f64> = report.rows.iter().map(|row| row.score).collect();
    assert_eq!(scores, SCORES.to_vec());
}

#[tokio::test]
async fn test_exclusions_and_other_surveys() {
    let report = heuristic_analyzer().analyze(&survey(), &snapshot()).await;

    assert_eq!(report.total_records, 22);
    assert_eq!(report.exclusions.len(), 1);
    assert_eq!(report.exclusions[0].respondent_id, "r22");
    assert!(report.rows.iter().all(|row| row.respondent_id.starts_with('r')));
}

#[tokio::test]
async fn test_heuristic_labels() {
    let report = heuristic_analyzer().analyze(&survey(), &snapshot()).await;

    let total: usize = report.sentiment_distribution.values().sum();
    assert_eq!(total, RESPONDENTS.len());
    assert_eq!(report.classification.commented, COMMENTED);
    assert_eq!(report.classification.strategy, "heuristic");

    assert_eq!(report.rows[0].sentiment, Sentiment::Positive);
    assert_eq!(report.rows[1].sentiment, Sentiment::Negative);
    assert_eq!(report.rows[1].category, Category::Navigation);
    assert_eq!(report.rows[4].category, Category::Navigation);
    // no comment, "Sin comentario", "" and "N/A"
    for index in [2, 6, 14, 19] {
        assert_eq!(report.rows[index].sentiment, Sentiment::Neutral);
        assert_eq!(report.rows[index].category, Category::Unclassified);
    }
}

#[tokio::test]
async fn test_recommendations_are_sorted_and_non_empty() {
    let report = heuristic_analyzer().analyze(&survey(), &snapshot()).await;

    assert!(!report.recommendations.is_empty());
    assert!(report
        .recommendations
        .iter()
        .any(|r| r.rule == "navigation_terms"));
    assert!(!report.recommendations.iter().any(|r| r.rule == "low_score"));

    let keys: Vec<_> = report
        .recommendations
        .iter()
        .map(|r| (r.priority, r.rule.clone()))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[tokio::test]
async fn test_rerun_gives_identical_numbers_and_bytes() {
    let charts = BarChartRenderer::default();

    // separate analyzers so the second run cannot be served from cache
    let first = heuristic_analyzer()
        .generate_report(&survey(), &snapshot(), &charts, generated_at())
        .await
        .unwrap();
    let second = heuristic_analyzer()
        .generate_report(&survey(), &snapshot(), &charts, generated_at())
        .await
        .unwrap();

    assert_eq!(first.analysis, second.analysis);
    assert_eq!(first.document.bytes, second.document.bytes);
    assert_eq!(first.document.page_count, second.document.page_count);
}

#[tokio::test]
async fn test_document_is_paginated_without_overlaps() {
    let charts = BarChartRenderer::default();
    let report = heuristic_analyzer()
        .generate_report(&survey(), &snapshot(), &charts, generated_at())
        .await
        .unwrap();
    let document = &report.document;

    assert!(document.bytes.starts_with(b"%PDF-1.4"));
    assert!(document.page_count > 1);
    assert!(!document.has_overlaps());
    assert_eq!(document.count(SectionKind::Chart), 3);
    assert_eq!(document.count(SectionKind::ChartPlaceholder), 0);
    assert_eq!(document.count(SectionKind::Header), 1);
    assert!(document.count(SectionKind::Detail) >= 1);

    let pages = document
        .bytes
        .windows(b"/Type /Page /Parent".len())
        .filter(|w| *w == b"/Type /Page /Parent")
        .count();
    assert_eq!(pages, document.page_count);
}

#[tokio::test]
async fn test_missing_chart_renderer_output_uses_placeholders() {
    let report = heuristic_analyzer()
        .generate_report(&survey(), &snapshot(), &StaticCharts::new(), generated_at())
        .await
        .unwrap();

    assert_eq!(report.document.count(SectionKind::ChartPlaceholder), 3);
    assert!(!report.document.has_overlaps());
}

#[tokio::test]
async fn test_remote_without_credentials_degrades_to_not_configured() {
    let analyzer = UsabilityAnalyzer::with_classifier(
        EngineConfig::default(),
        Arc::new(RemoteFewShotClassifier::not_configured()),
    );
    let report = analyzer
        .generate_report(&survey(), &snapshot(), &StaticCharts::new(), generated_at())
        .await
        .unwrap();
    let analysis = &report.analysis;

    assert!(analysis
        .rows
        .iter()
        .all(|row| row.sentiment == Sentiment::NotConfigured && row.category == Category::NotConfigured));
    assert_eq!(analysis.classification.not_configured, COMMENTED);
    assert!(analysis
        .recommendations
        .iter()
        .any(|r| r.rule == "classification_degraded"));
    // scoring is unaffected by classification
    assert!((analysis.aggregate.mean().unwrap() - expected_mean()).abs() < 1e-9);
}

#[tokio::test]
async fn test_remote_classification_with_partial_failures() {
    let backend = Arc::new(ScriptedBackend::replying("[Positivo][Utilidad]").failing_on("lento"));
    let classifier = RemoteFewShotClassifier::with_backend(backend.clone(), Duration::from_secs(5));
    let analyzer = UsabilityAnalyzer::with_classifier(EngineConfig::default(), Arc::new(classifier));

    let report = analyzer.analyze(&survey(), &snapshot()).await;

    // placeholders never reach the backend
    assert_eq!(backend.calls(), COMMENTED);
    assert_eq!(report.classification.failed, 1);
    assert_eq!(report.rows[10].sentiment, Sentiment::Error);
    assert_eq!(report.rows[10].category, Category::ClassificationFailed);
    assert_eq!(report.rows[0].category, Category::Utility);
    assert_eq!(report.rows[2].category, Category::Unclassified);
    assert_eq!(
        report.category_distribution.get(&Category::Utility),
        Some(&(COMMENTED - 1))
    );
}
