//! Individual insight rules
//!
//! Each rule is an independent predicate over [`InsightInput`]; none reads
//! another rule's output, so evaluation order cannot change what fires.

use super::InsightInput;
use crate::classification::lexicon::stems_for;
use crate::config::InsightConfig;
use crate::types::{Category, Priority, Recommendation, Sentiment};

/// Predicate producing at most one recommendation
pub trait InsightRule: Send + Sync {
    /// Stable identifier, also the secondary sort key
    fn id(&self) -> &'static str;

    fn evaluate(&self, input: &InsightInput) -> Option<Recommendation>;
}

fn recommend(priority: Priority, rule: &str, message: String) -> Option<Recommendation> {
    Some(Recommendation {
        priority,
        rule: rule.to_string(),
        message,
    })
}

/// Aggregate score below the acceptable band
pub struct LowScoreRule {
    pub threshold: f64,
}

impl InsightRule for LowScoreRule {
    fn id(&self) -> &'static str {
        "low_score"
    }

    fn evaluate(&self, input: &InsightInput) -> Option<Recommendation> {
        let score = input.score?;
        if score >= self.threshold {
            return None;
        }
        recommend(
            Priority::High,
            self.id(),
            format!(
                "Usability score {:.1} is below {:.0}: review critical flows with users.",
                score, self.threshold
            ),
        )
    }
}

/// No structurally valid responses to score
pub struct InsufficientDataRule;

impl InsightRule for InsufficientDataRule {
    fn id(&self) -> &'static str {
        "insufficient_data"
    }

    fn evaluate(&self, input: &InsightInput) -> Option<Recommendation> {
        if input.score.is_some() {
            return None;
        }
        recommend(
            Priority::High,
            self.id(),
            "No valid responses for this survey: collect more responses before drawing conclusions."
                .to_string(),
        )
    }
}

/// Comment vocabulary leaning on one theme
pub struct ThemeTermsRule {
    pub id: &'static str,
    pub category: Category,
    pub cutoff: f64,
    pub priority: Priority,
    pub advice: &'static str,
}

impl ThemeTermsRule {
    pub fn navigation(cutoff: f64) -> Self {
        Self {
            id: "navigation_terms",
            category: Category::Navigation,
            cutoff,
            priority: Priority::Medium,
            advice: "review menus, filters and section layout",
        }
    }

    pub fn explainability(cutoff: f64) -> Self {
        Self {
            id: "explainability_terms",
            category: Category::Explainability,
            cutoff,
            priority: Priority::Medium,
            advice: "add metric descriptions, tooltips and guided help",
        }
    }

    pub fn visualization(cutoff: f64) -> Self {
        Self {
            id: "visualization_terms",
            category: Category::Visualization,
            cutoff,
            priority: Priority::Low,
            advice: "refresh chart styling and color choices",
        }
    }
}

impl InsightRule for ThemeTermsRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn evaluate(&self, input: &InsightInput) -> Option<Recommendation> {
        let frequency = input.terms.group_frequency(stems_for(self.category));
        if frequency <= self.cutoff {
            return None;
        }
        recommend(
            self.priority,
            self.id,
            format!(
                "{} terms make up {:.0}% of comment vocabulary: {}.",
                self.category,
                frequency * 100.0,
                self.advice
            ),
        )
    }
}

/// Large share of negative comments
pub struct NegativeSentimentRule {
    pub cutoff: f64,
}

impl InsightRule for NegativeSentimentRule {
    fn id(&self) -> &'static str {
        "negative_sentiment"
    }

    fn evaluate(&self, input: &InsightInput) -> Option<Recommendation> {
        let commented = input.classification.commented;
        if commented == 0 {
            return None;
        }
        let negative = input.sentiment_count(Sentiment::Negative);
        let share = negative as f64 / commented as f64;
        if share < self.cutoff {
            return None;
        }
        recommend(
            Priority::Medium,
            self.id(),
            format!(
                "{} of {} comments are negative ({:.0}%): follow up on the reported pain points.",
                negative,
                commented,
                share * 100.0
            ),
        )
    }
}

/// Qualitative labels mostly missing
pub struct ClassificationDegradedRule {
    pub cutoff: f64,
}

impl InsightRule for ClassificationDegradedRule {
    fn id(&self) -> &'static str {
        "classification_degraded"
    }

    fn evaluate(&self, input: &InsightInput) -> Option<Recommendation> {
        let summary = &input.classification;
        if summary.commented == 0 || summary.degraded_share() <= self.cutoff {
            return None;
        }
        recommend(
            Priority::Low,
            self.id(),
            format!(
                "Qualitative labels incomplete: {} of {} comments could not be classified.",
                summary.failed + summary.not_configured,
                summary.commented
            ),
        )
    }
}

/// Default rule set with thresholds from configuration
pub fn default_rules(config: &InsightConfig) -> Vec<Box<dyn InsightRule>> {
    vec![
        Box::new(LowScoreRule {
            threshold: config.acceptable_score,
        }),
        Box::new(InsufficientDataRule),
        Box::new(ThemeTermsRule::navigation(config.navigation_cutoff)),
        Box::new(ThemeTermsRule::explainability(config.explainability_cutoff)),
        Box::new(ThemeTermsRule::visualization(config.visualization_cutoff)),
        Box::new(NegativeSentimentRule {
            cutoff: config.negative_share_cutoff,
        }),
        Box::new(ClassificationDegradedRule {
            cutoff: config.degraded_share_cutoff,
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::ClassificationSummary;
    use crate::insights::TermFrequencies;

    fn input(score: Option<f64>) -> InsightInput {
        InsightInput {
            score,
            ..Default::default()
        }
    }

    #[test]
    fn test_low_score_boundary() {
        let rule = LowScoreRule { threshold: 68.0 };
        assert!(rule.evaluate(&input(Some(67.5))).is_some());
        assert!(rule.evaluate(&input(Some(68.0))).is_none());
        assert!(rule.evaluate(&input(None)).is_none());
    }

    #[test]
    fn test_insufficient_data_only_without_score() {
        assert!(InsufficientDataRule.evaluate(&input(None)).is_some());
        assert!(InsufficientDataRule.evaluate(&input(Some(10.0))).is_none());
    }

    #[test]
    fn test_navigation_terms_fire_above_cutoff() {
        let rule = ThemeTermsRule::navigation(0.05);
        let mut with_terms = input(Some(75.0));
        with_terms.terms =
            TermFrequencies::from_comments(["Me costo ubicar los filtros del menu"]);
        let fired = rule.evaluate(&with_terms).unwrap();
        assert_eq!(fired.priority, Priority::Medium);
        assert_eq!(fired.rule, "navigation_terms");

        assert!(rule.evaluate(&input(Some(75.0))).is_none());
    }

    #[test]
    fn test_negative_share() {
        let rule = NegativeSentimentRule { cutoff: 0.3 };
        let mut data = input(Some(75.0));
        data.sentiments.insert(Sentiment::Negative, 3);
        data.sentiments.insert(Sentiment::Positive, 7);
        data.classification = ClassificationSummary {
            commented: 10,
            ..Default::default()
        };
        assert!(rule.evaluate(&data).is_some());

        data.sentiments.insert(Sentiment::Negative, 2);
        assert!(rule.evaluate(&data).is_none());
    }

    #[test]
    fn test_degraded_requires_more_than_half() {
        let rule = ClassificationDegradedRule { cutoff: 0.5 };
        let mut data = input(Some(75.0));
        data.classification = ClassificationSummary {
            strategy: "remote_few_shot".to_string(),
            commented: 4,
            failed: 1,
            not_configured: 1,
        };
        assert!(rule.evaluate(&data).is_none());
        data.classification.failed = 2;
        assert!(rule.evaluate(&data).is_some());
    }
}
