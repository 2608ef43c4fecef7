//! Insight synthesis
//!
//! Turns the aggregate score, the sentiment distribution and the comment
//! vocabulary into an ordered list of recommendations. Rules fire
//! independently and may co-fire; when none fires the synthesizer emits a
//! single low-priority "stable" recommendation, so the output is never empty.

pub mod rules;
pub mod terms;

pub use rules::{default_rules, InsightRule};
pub use terms::{TermCount, TermFrequencies};

use crate::classification::ClassificationSummary;
use crate::config::InsightConfig;
use crate::types::{Priority, Recommendation, Sentiment};
use std::collections::BTreeMap;
use tracing::debug;

/// Rule id of the fallback recommendation
pub const STABLE_RULE: &str = "stable";

/// Everything the rules may look at
#[derive(Debug, Clone, Default)]
pub struct InsightInput {
    /// Aggregate mean; `None` when no valid responses exist
    pub score: Option<f64>,

    pub sentiments: BTreeMap<Sentiment, usize>,
    pub terms: TermFrequencies,
    pub classification: ClassificationSummary,
}

impl InsightInput {
    pub fn sentiment_count(&self, sentiment: Sentiment) -> usize {
        self.sentiments.get(&sentiment).copied().unwrap_or(0)
    }
}

/// Rule engine over [`InsightInput`]
pub struct InsightSynthesizer {
    rules: Vec<Box<dyn InsightRule>>,
}

impl InsightSynthesizer {
    pub fn new(config: &InsightConfig) -> Self {
        Self::with_rules(default_rules(config))
    }

    pub fn with_rules(rules: Vec<Box<dyn InsightRule>>) -> Self {
        Self { rules }
    }

    /// Fired recommendations sorted by (priority, rule id); never empty
    pub fn synthesize(&self, input: &InsightInput) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let fired = rule.evaluate(input);
                if fired.is_some() {
                    debug!("Insight rule fired: {}", rule.id());
                }
                fired
            })
            .collect();

        if recommendations.is_empty() {
            recommendations.push(Recommendation {
                priority: Priority::Low,
                rule: STABLE_RULE.to_string(),
                message: "Usability is stable: continue monitoring with periodic surveys."
                    .to_string(),
            });
        }

        recommendations.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.rule.cmp(&b.rule))
        });
        recommendations
    }
}
