//! Usability Insights - SUS scoring and feedback analytics
//!
//! Evaluates end-user feedback on a software product collected with the
//! System Usability Scale questionnaire plus free-text comments:
//! - SUS scoring of ten Likert answers per respondent, with aggregate bands
//! - Sentiment and topic classification of comments (local heuristic or
//!   remote few-shot LLM)
//! - Rule-based, prioritized recommendations
//! - A paginated PDF report with KPIs, charts, topics and a detail table
//!
//! # Architecture
//!
//! - **Survey**: read-only response sets built per request from a snapshot
//! - **Scoring**: pure SUS arithmetic and aggregation
//! - **Classification**: the `FeedbackClassifier` trait and its strategies
//! - **Insights**: term frequencies and the recommendation rules
//! - **Report**: flow layout, chart assets and the PDF writer
//!
//! # Example
//!
//! ```ignore
//! use usability_core::{EngineConfig, SurveyId, UsabilityAnalyzer};
//! use usability_core::report::BarChartRenderer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = EngineConfig::load(None)?;
//!     let analyzer = UsabilityAnalyzer::new(config);
//!
//!     let records = serde_json::from_str(&std::fs::read_to_string("responses.json")?)?;
//!     let report = analyzer
//!         .generate_report(
//!             &SurveyId::new("DASHBOARD_GENERAL"),
//!             &records,
//!             &BarChartRenderer::default(),
//!             chrono::Utc::now(),
//!         )
//!         .await?;
//!
//!     std::fs::write("report.pdf", &report.document.bytes)?;
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod cache;
pub mod classification;
pub mod config;
pub mod error;
pub mod insights;
pub mod report;
pub mod scoring;
pub mod services;
pub mod survey;
pub mod text;
pub mod types;

// Re-export commonly used types
pub use analysis::{AnalysisReport, GeneratedReport, RespondentRow, UsabilityAnalyzer};
pub use classification::{
    build_classifier, classify_batch, ClassificationSummary, FeedbackClassifier,
    HeuristicClassifier, RemoteFewShotClassifier,
};
pub use config::{EngineConfig, InvalidAnswerPolicy};
pub use error::{Result, UsabilityError, ValidationError};
pub use insights::{InsightInput, InsightSynthesizer, TermFrequencies};
pub use report::{ChartRenderer, RenderedDocument, ReportCompositor};
pub use scoring::{AggregateOutcome, AggregateScore, SusScorer, UsabilityBand};
pub use services::LlmService;
pub use survey::{ContentHash, Exclusion, RawAnswer, ResponseRecord, SurveyResponse, SurveySet};
pub use types::{
    Category, ClassificationResult, LikertAnswers, Priority, Recommendation, Sentiment, SurveyId,
};
