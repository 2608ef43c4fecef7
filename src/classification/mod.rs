//! Feedback classification
//!
//! Free-text comments are labeled with a sentiment and a topical category by
//! a [`FeedbackClassifier`]. Two interchangeable strategies exist:
//!
//! - [`HeuristicClassifier`]: local lexicon, always available
//! - [`RemoteFewShotClassifier`]: few-shot prompt to a remote LLM, degrading
//!   to `NotConfigured` / `Error` labels instead of failing
//!
//! The strategy is chosen once by [`build_classifier`]; callers only ever see
//! the trait.

pub mod few_shot;
pub mod heuristic;
pub mod lexicon;

pub use few_shot::RemoteFewShotClassifier;
pub use heuristic::HeuristicClassifier;

use crate::config::{ClassifierConfig, ClassifierStrategy};
use crate::types::{Category, ClassificationResult, Sentiment};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Capability shared by all classification strategies
#[async_trait]
pub trait FeedbackClassifier: Send + Sync {
    /// Strategy name for logs and reports
    fn name(&self) -> &'static str;

    /// Label one comment; never fails, degraded outcomes are labels
    async fn classify(&self, text: &str) -> ClassificationResult;
}

/// Construct the configured strategy
pub fn build_classifier(config: &ClassifierConfig) -> Arc<dyn FeedbackClassifier> {
    match config.strategy {
        ClassifierStrategy::Heuristic => {
            info!(
                "Using heuristic classifier (category lookup: {})",
                config.heuristic_categories
            );
            if config.heuristic_categories {
                Arc::new(HeuristicClassifier::with_category_lookup())
            } else {
                Arc::new(HeuristicClassifier::new())
            }
        }
        ClassifierStrategy::RemoteFewShot => Arc::new(RemoteFewShotClassifier::from_config(config)),
    }
}

/// Counts of degraded labels in one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    pub strategy: String,

    /// Items that carried an actual comment
    pub commented: usize,

    /// Commented items labeled `(Error, ClassificationFailed)`
    pub failed: usize,

    /// Commented items labeled `(NotConfigured, NotConfigured)`
    pub not_configured: usize,
}

impl ClassificationSummary {
    /// Share of commented items whose label degraded
    pub fn degraded_share(&self) -> f64 {
        if self.commented == 0 {
            0.0
        } else {
            (self.failed + self.not_configured) as f64 / self.commented as f64
        }
    }
}

/// Classify comments in order, isolating failures per item
///
/// A missing comment is handed to the classifier as empty text, so it gets
/// the same label a placeholder comment would under that strategy.
pub async fn classify_batch(
    classifier: &dyn FeedbackClassifier,
    comments: &[Option<&str>],
) -> (Vec<ClassificationResult>, ClassificationSummary) {
    let mut results = Vec::with_capacity(comments.len());
    let mut summary = ClassificationSummary {
        strategy: classifier.name().to_string(),
        ..Default::default()
    };

    for comment in comments {
        let commented = comment.is_some_and(|text| !heuristic::is_placeholder(text));
        let result = classifier.classify(comment.unwrap_or_default()).await;

        if commented {
            summary.commented += 1;
            match (result.sentiment, result.category) {
                (Sentiment::Error, _) | (_, Category::ClassificationFailed) => summary.failed += 1,
                (Sentiment::NotConfigured, _) => summary.not_configured += 1,
                _ => {}
            }
        }
        results.push(result);
    }

    info!(
        "Classified {} comments with {} ({} failed, {} not configured)",
        results.len(),
        summary.strategy,
        summary.failed,
        summary.not_configured
    );

    (results, summary)
}
