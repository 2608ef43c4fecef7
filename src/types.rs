//! Core data types for the usability analytics engine
//!
//! This module defines the closed vocabularies (sentiment, category, priority)
//! and the validated Likert answer tuple that the scorer, the classifiers, the
//! insight rules and the report compositor all share.

use crate::error::ValidationError;
use crate::text::normalize;
use serde::{Deserialize, Serialize};

/// Number of items in the System Usability Scale questionnaire
pub const SUS_ITEM_COUNT: usize = 10;

/// Identifier of one survey instance
///
/// Wraps the raw identifier string so survey ids are not mixed up with
/// respondent ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyId(pub String);

impl SurveyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SurveyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ten Likert answers, each guaranteed to lie in 1..=5
///
/// Position 1 is index 0. Construction is the only place validation happens,
/// so anything holding a `LikertAnswers` can be scored without checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LikertAnswers([u8; SUS_ITEM_COUNT]);

impl LikertAnswers {
    /// Validate ten raw integers
    pub fn new(values: [i64; SUS_ITEM_COUNT]) -> Result<Self, ValidationError> {
        let mut answers = [0u8; SUS_ITEM_COUNT];
        for (index, value) in values.iter().enumerate() {
            if !(1..=5).contains(value) {
                return Err(ValidationError::OutOfRange {
                    position: index + 1,
                    value: *value,
                });
            }
            answers[index] = *value as u8;
        }
        Ok(Self(answers))
    }

    /// Validate a slice of optional answers; missing entries are errors
    pub fn from_slice(values: &[Option<i64>]) -> Result<Self, ValidationError> {
        if values.len() != SUS_ITEM_COUNT {
            return Err(ValidationError::WrongAnswerCount {
                found: values.len(),
            });
        }
        let mut raw = [0i64; SUS_ITEM_COUNT];
        for (index, value) in values.iter().enumerate() {
            raw[index] = value.ok_or(ValidationError::MissingAnswer {
                position: index + 1,
            })?;
        }
        Self::new(raw)
    }

    /// Best possible answers: 5 on positive items, 1 on negative items
    pub fn ideal() -> Self {
        Self([5, 1, 5, 1, 5, 1, 5, 1, 5, 1])
    }

    /// Worst possible answers: 1 on positive items, 5 on negative items
    pub fn inverted() -> Self {
        Self([1, 5, 1, 5, 1, 5, 1, 5, 1, 5])
    }

    pub fn values(&self) -> &[u8; SUS_ITEM_COUNT] {
        &self.0
    }
}

/// Coarse emotional polarity of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    /// Remote classification failed for this item
    Error,
    /// No remote backend configured for this request
    NotConfigured,
}

impl Sentiment {
    pub const ALL: [Sentiment; 5] = [
        Sentiment::Positive,
        Sentiment::Neutral,
        Sentiment::Negative,
        Sentiment::Error,
        Sentiment::NotConfigured,
    ];

    /// Parse a label in English or in the Spanish used by the exemplars
    pub fn from_label(label: &str) -> Option<Self> {
        match normalize(label).as_str() {
            "positive" | "positivo" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" | "negativo" => Some(Sentiment::Negative),
            _ => None,
        }
    }

    /// Whether this label is an actual polarity rather than a degraded marker
    pub fn is_polarity(&self) -> bool {
        matches!(
            self,
            Sentiment::Positive | Sentiment::Neutral | Sentiment::Negative
        )
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Neutral => write!(f, "Neutral"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Error => write!(f, "Error"),
            Sentiment::NotConfigured => write!(f, "NotConfigured"),
        }
    }
}

/// Topical category of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Satisfaction,
    Visualization,
    Explainability,
    Usability,
    Navigation,
    Utility,
    LearningCurve,
    Unclassified,
    /// Remote classification failed for this item
    ClassificationFailed,
    /// No remote backend configured for this request
    NotConfigured,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Satisfaction,
        Category::Visualization,
        Category::Explainability,
        Category::Usability,
        Category::Navigation,
        Category::Utility,
        Category::LearningCurve,
        Category::Unclassified,
        Category::ClassificationFailed,
        Category::NotConfigured,
    ];

    /// Parse a topical label in English or Spanish
    ///
    /// Only the seven topical categories can be produced by a backend;
    /// the degraded markers are never accepted from remote output.
    pub fn from_label(label: &str) -> Option<Self> {
        let key: String = normalize(label)
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match key.as_str() {
            "satisfaction" | "satisfaccion" => Some(Category::Satisfaction),
            "visualization" | "visualizacion" => Some(Category::Visualization),
            "explainability" | "explicabilidad" => Some(Category::Explainability),
            "usability" | "usabilidad" => Some(Category::Usability),
            "navigation" | "navegacion" => Some(Category::Navigation),
            "utility" | "utilidad" => Some(Category::Utility),
            "learningcurve" | "curvadeaprendizaje" => Some(Category::LearningCurve),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Category::Satisfaction => "Satisfaction",
            Category::Visualization => "Visualization",
            Category::Explainability => "Explainability",
            Category::Usability => "Usability",
            Category::Navigation => "Navigation",
            Category::Utility => "Utility",
            Category::LearningCurve => "Learning curve",
            Category::Unclassified => "Unclassified",
            Category::ClassificationFailed => "Classification failed",
            Category::NotConfigured => "Not configured",
        };
        write!(f, "{}", label)
    }
}

/// Output of any feedback classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub sentiment: Sentiment,
    pub category: Category,
}

impl ClassificationResult {
    pub fn new(sentiment: Sentiment, category: Category) -> Self {
        Self {
            sentiment,
            category,
        }
    }

    /// Label for empty or placeholder comments
    pub fn no_comment() -> Self {
        Self::new(Sentiment::Neutral, Category::Unclassified)
    }

    /// Label for a remote call that failed or returned unparsable output
    pub fn failed() -> Self {
        Self::new(Sentiment::Error, Category::ClassificationFailed)
    }

    /// Label used for every item when no remote backend is available
    pub fn not_configured() -> Self {
        Self::new(Sentiment::NotConfigured, Category::NotConfigured)
    }

    pub fn is_degraded(&self) -> bool {
        !self.sentiment.is_polarity()
    }
}

/// Recommendation urgency; sorts High first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

/// Prioritized action produced by the insight rules
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,

    /// Identifier of the rule that produced this recommendation
    pub rule: String,

    pub message: String,
}
