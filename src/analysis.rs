//! End-to-end analysis pipeline
//!
//! Snapshot records → [`SurveySet`] → scores and classifications →
//! distributions and term frequencies → recommendations, and optionally the
//! rendered report document. Each request builds its own set; the only state
//! shared across requests is the optional [`AnalysisCache`].

use crate::cache::AnalysisCache;
use crate::classification::{build_classifier, classify_batch, ClassificationSummary, FeedbackClassifier};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::insights::{InsightInput, InsightSynthesizer, TermCount, TermFrequencies};
use crate::report::{ChartRenderer, RenderedDocument, ReportCompositor};
use crate::scoring::AggregateOutcome;
use crate::survey::{ContentHash, Exclusion, ResponseRecord, SurveySet};
use crate::types::{Category, Recommendation, Sentiment, SurveyId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Per-respondent line of the detail table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RespondentRow {
    pub respondent_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent: Option<String>,

    pub score: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    pub sentiment: Sentiment,
    pub category: Category,
}

/// Structured analysis result for the UI layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub survey_id: SurveyId,
    pub content_hash: ContentHash,
    pub aggregate: AggregateOutcome,
    pub sentiment_distribution: BTreeMap<Sentiment, usize>,
    pub category_distribution: BTreeMap<Category, usize>,
    pub recommendations: Vec<Recommendation>,

    /// Records in the snapshot for this survey, valid or not
    pub total_records: usize,
    pub exclusions: Vec<Exclusion>,
    pub imputed_answers: usize,

    pub top_terms: Vec<TermCount>,
    pub classification: ClassificationSummary,
    pub rows: Vec<RespondentRow>,
}

impl AnalysisReport {
    pub fn valid_responses(&self) -> usize {
        self.rows.len()
    }

    /// Most frequent topical category, if any comment got one
    pub fn dominant_category(&self) -> Option<(Category, usize)> {
        self.category_distribution
            .iter()
            .filter(|(category, _)| {
                !matches!(
                    category,
                    Category::Unclassified | Category::ClassificationFailed | Category::NotConfigured
                )
            })
            // max_by_key keeps the last maximum; reverse so the earlier category wins ties
            .rev()
            .max_by_key(|(_, count)| **count)
            .map(|(category, count)| (*category, *count))
    }
}

/// Analysis plus its rendered document
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub analysis: AnalysisReport,
    pub document: RenderedDocument,
}

/// Engine entry point
pub struct UsabilityAnalyzer {
    config: EngineConfig,
    classifier: Arc<dyn FeedbackClassifier>,
    synthesizer: InsightSynthesizer,
    cache: Option<AnalysisCache<AnalysisReport>>,
}

impl UsabilityAnalyzer {
    /// Build with the configured classification strategy
    pub fn new(config: EngineConfig) -> Self {
        let classifier = build_classifier(&config.classifier);
        Self::with_classifier(config, classifier)
    }

    /// Build around an explicit classifier
    pub fn with_classifier(config: EngineConfig, classifier: Arc<dyn FeedbackClassifier>) -> Self {
        let synthesizer = InsightSynthesizer::new(&config.insights);
        let cache = AnalysisCache::from_config(&config.cache);
        Self {
            config,
            classifier,
            synthesizer,
            cache,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze one survey out of a (possibly mixed) snapshot
    pub async fn analyze(&self, survey_id: &SurveyId, records: &[ResponseRecord]) -> AnalysisReport {
        let set = SurveySet::from_snapshot(
            survey_id,
            records,
            self.config.scoring.invalid_answer_policy,
        );
        self.analyze_set(&set).await
    }

    /// Analyze an already built response set
    pub async fn analyze_set(&self, set: &SurveySet) -> AnalysisReport {
        if let Some(cached) = self
            .cache
            .as_ref()
            .and_then(|cache| cache.get(set.survey_id(), set.content_hash()))
        {
            return cached;
        }
        debug!("Analysis cache miss for survey {}", set.survey_id());

        let report = self.run(set).await;

        // Transient backend failures should not be pinned for a whole TTL
        if let Some(cache) = &self.cache {
            if report.classification.failed == 0 {
                cache.insert(
                    set.survey_id().clone(),
                    set.content_hash().clone(),
                    report.clone(),
                );
            }
        }

        report
    }

    async fn run(&self, set: &SurveySet) -> AnalysisReport {
        let responses = set.responses();
        let aggregate = set.aggregate();

        let comments: Vec<Option<&str>> = responses.iter().map(|r| r.comment.as_deref()).collect();
        let (labels, classification) = classify_batch(self.classifier.as_ref(), &comments).await;

        let mut sentiment_distribution = BTreeMap::new();
        let mut category_distribution = BTreeMap::new();
        for label in &labels {
            *sentiment_distribution.entry(label.sentiment).or_insert(0) += 1;
            *category_distribution.entry(label.category).or_insert(0) += 1;
        }

        let terms = TermFrequencies::from_comments(comments.iter().flatten().copied());
        let top_terms = terms.top_terms(self.config.insights.top_terms);

        let recommendations = self.synthesizer.synthesize(&InsightInput {
            score: aggregate.mean(),
            sentiments: sentiment_distribution.clone(),
            terms,
            classification: classification.clone(),
        });

        let rows = responses
            .iter()
            .zip(&labels)
            .map(|(response, label)| RespondentRow {
                respondent_id: response.respondent_id.clone(),
                respondent: response.respondent.clone(),
                score: response.score(),
                comment: response.comment.clone(),
                sentiment: label.sentiment,
                category: label.category,
            })
            .collect();

        match aggregate.mean() {
            Some(mean) => info!(
                "Survey {}: mean score {:.1} over {} responses ({} excluded)",
                set.survey_id(),
                mean,
                responses.len(),
                set.exclusions().len()
            ),
            None => info!(
                "Survey {}: no valid responses ({} excluded)",
                set.survey_id(),
                set.exclusions().len()
            ),
        }

        AnalysisReport {
            survey_id: set.survey_id().clone(),
            content_hash: set.content_hash().clone(),
            aggregate,
            sentiment_distribution,
            category_distribution,
            recommendations,
            total_records: set.total_records(),
            exclusions: set.exclusions().to_vec(),
            imputed_answers: set.imputed_answers(),
            top_terms,
            classification,
            rows,
        }
    }

    /// Analyze and render the report document
    pub async fn generate_report(
        &self,
        survey_id: &SurveyId,
        records: &[ResponseRecord],
        charts: &dyn ChartRenderer,
        generated_at: DateTime<Utc>,
    ) -> Result<GeneratedReport> {
        let analysis = self.analyze(survey_id, records).await;
        let document =
            ReportCompositor::new(&self.config.layout, charts).compose(&analysis, generated_at)?;

        info!(
            "Rendered report for survey {}: {} pages, {} bytes",
            survey_id,
            document.page_count,
            document.bytes.len()
        );

        Ok(GeneratedReport { analysis, document })
    }
}
