//! Local lexicon-based classifier
//!
//! No network, no model: polarity comes from a small word lexicon with
//! negation and intensifier handling, nudged by domain keyword lists. The
//! topical category is only assigned when the keyword→category lookup is
//! enabled; otherwise it stays `Unclassified`.

use super::lexicon::{
    CATEGORY_STEMS, INTENSIFIERS, NEGATIONS, NEGATIVE_KEYWORDS, PLACEHOLDERS,
    POLARITY, POSITIVE_KEYWORDS,
};
use super::FeedbackClassifier;
use crate::text::{normalize, tokenize};
use crate::types::{Category, ClassificationResult, Sentiment};
use async_trait::async_trait;
use tracing::debug;

/// Polarity shift applied when a domain keyword list matches
const KEYWORD_ADJUSTMENT: f64 = 0.2;

/// Bucket boundary between Neutral and Positive/Negative
const POLARITY_THRESHOLD: f64 = 0.1;

/// Multiplier for a negated word
const NEGATION_FACTOR: f64 = -0.5;

const INTENSIFIER_FACTOR: f64 = 1.3;

/// Whether a comment is empty or a "no comment" equivalent
pub fn is_placeholder(text: &str) -> bool {
    let normalized = normalize(text);
    let trimmed = normalized.trim_matches(|c: char| !c.is_alphanumeric() && c != '/');
    trimmed.is_empty()
        || !trimmed.chars().any(char::is_alphanumeric)
        || PLACEHOLDERS.contains(&trimmed)
}

/// Heuristic sentiment (and optional category) classifier
#[derive(Debug, Clone, Default)]
pub struct HeuristicClassifier {
    category_lookup: bool,
}

impl HeuristicClassifier {
    /// Sentiment only; category stays `Unclassified`
    pub fn new() -> Self {
        Self {
            category_lookup: false,
        }
    }

    /// Sentiment plus keyword→category lookup
    pub fn with_category_lookup() -> Self {
        Self {
            category_lookup: true,
        }
    }

    /// Polarity estimate in [-1, 1] before bucketing
    pub fn polarity(&self, text: &str) -> f64 {
        let tokens = tokenize(text);

        let mut base = base_polarity(&tokens);
        base += KEYWORD_ADJUSTMENT * keyword_direction(&tokens, POSITIVE_KEYWORDS);
        base -= KEYWORD_ADJUSTMENT * keyword_direction(&tokens, NEGATIVE_KEYWORDS);

        base.clamp(-1.0, 1.0)
    }

    /// Category with the most stem hits; ties go to the earlier table entry
    pub fn category(&self, text: &str) -> Category {
        let tokens = tokenize(text);
        let mut best: Option<(Category, usize)> = None;

        for (category, stems) in CATEGORY_STEMS {
            let hits = tokens
                .iter()
                .filter(|token| stems.iter().any(|stem| token.starts_with(stem)))
                .count();
            if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
                best = Some((*category, hits));
            }
        }

        best.map(|(category, _)| category)
            .unwrap_or(Category::Unclassified)
    }

    fn classify_sync(&self, text: &str) -> ClassificationResult {
        if is_placeholder(text) {
            return ClassificationResult::no_comment();
        }

        let polarity = self.polarity(text);
        let sentiment = if polarity > POLARITY_THRESHOLD {
            Sentiment::Positive
        } else if polarity < -POLARITY_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };

        let category = if self.category_lookup {
            self.category(text)
        } else {
            Category::Unclassified
        };

        debug!(
            "Heuristic classification: polarity {:.2} -> {} / {}",
            polarity, sentiment, category
        );

        ClassificationResult::new(sentiment, category)
    }
}

/// Whether one of the two tokens before `index` is a negation
fn is_negated(tokens: &[String], index: usize) -> bool {
    tokens[index.saturating_sub(2)..index]
        .iter()
        .any(|p| NEGATIONS.contains(&p.as_str()))
}

/// 1.0 when a keyword appears plainly, -1.0 when every match is negated,
/// 0.0 when none appears
fn keyword_direction(tokens: &[String], keywords: &[&str]) -> f64 {
    let mut negated_only = false;

    for keyword in keywords {
        let phrase: Vec<&str> = keyword.split(' ').collect();
        for start in 0..tokens.len() {
            let end = start + phrase.len();
            if end > tokens.len() || !tokens[start..end].iter().zip(&phrase).all(|(t, p)| t == p) {
                continue;
            }
            if !is_negated(tokens, start) {
                return 1.0;
            }
            negated_only = true;
        }
    }

    if negated_only {
        -1.0
    } else {
        0.0
    }
}

/// Mean lexicon valence of the words that carry one
fn base_polarity(tokens: &[String]) -> f64 {
    let mut valences = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        let Some(&valence) = POLARITY.get(token.as_str()) else {
            continue;
        };

        let mut value = valence;
        if index > 0 && INTENSIFIERS.contains(&tokens[index - 1].as_str()) {
            value *= INTENSIFIER_FACTOR;
        }
        if is_negated(tokens, index) {
            value *= NEGATION_FACTOR;
        }
        valences.push(value.clamp(-1.0, 1.0));
    }

    if valences.is_empty() {
        0.0
    } else {
        valences.iter().sum::<f64>() / valences.len() as f64
    }
}

#[async_trait]
impl FeedbackClassifier for HeuristicClassifier {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    async fn classify(&self, text: &str) -> ClassificationResult {
        self.classify_sync(text)
    }
}
