//! System Usability Scale scoring
//!
//! Odd items (1, 3, 5, 7, 9) are positively phrased and contribute
//! `value - 1`; even items (2, 4, 6, 8, 10) are negatively phrased and
//! contribute `5 - value`. The contribution sum (0..=40) is scaled by 2.5,
//! so every score lands in [0, 100].
//!
//! Everything here is a pure function of its input.

use crate::error::ValidationError;
use crate::types::LikertAnswers;
use serde::{Deserialize, Serialize};

/// Multiplier from contribution sum to the 0-100 scale
const SUS_SCALE: f64 = 2.5;

/// Number of histogram buckets (10 points each) in the score distribution
pub const HISTOGRAM_BUCKETS: usize = 10;

/// Usability classification band for an aggregate score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsabilityBand {
    Excellent,
    Acceptable,
    Poor,
    NotAcceptable,
}

impl UsabilityBand {
    /// Fixed thresholds: 80.3, 68, 51
    pub fn from_score(score: f64) -> Self {
        if score >= 80.3 {
            UsabilityBand::Excellent
        } else if score >= 68.0 {
            UsabilityBand::Acceptable
        } else if score >= 51.0 {
            UsabilityBand::Poor
        } else {
            UsabilityBand::NotAcceptable
        }
    }
}

impl std::fmt::Display for UsabilityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UsabilityBand::Excellent => write!(f, "Excellent"),
            UsabilityBand::Acceptable => write!(f, "Acceptable"),
            UsabilityBand::Poor => write!(f, "Poor"),
            UsabilityBand::NotAcceptable => write!(f, "Not acceptable"),
        }
    }
}

/// Aggregate over all structurally valid respondents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateScore {
    pub mean: f64,
    pub band: UsabilityBand,
    pub respondents: usize,
    pub min: f64,
    pub max: f64,

    /// Respondent counts per 10-point bucket; 100 falls in the last bucket
    pub histogram: [usize; HISTOGRAM_BUCKETS],
}

/// Result of aggregation; an empty valid set is reported, never divided by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum AggregateOutcome {
    Scored(AggregateScore),
    InsufficientData,
}

impl AggregateOutcome {
    pub fn mean(&self) -> Option<f64> {
        match self {
            AggregateOutcome::Scored(aggregate) => Some(aggregate.mean),
            AggregateOutcome::InsufficientData => None,
        }
    }

    pub fn band(&self) -> Option<UsabilityBand> {
        match self {
            AggregateOutcome::Scored(aggregate) => Some(aggregate.band),
            AggregateOutcome::InsufficientData => None,
        }
    }
}

/// SUS scorer
pub struct SusScorer;

impl SusScorer {
    /// Score one respondent's validated answers
    pub fn score(answers: &LikertAnswers) -> f64 {
        let sum: u32 = answers
            .values()
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                let value = u32::from(value);
                // index 0 is item 1 (positively phrased)
                if index % 2 == 0 {
                    value - 1
                } else {
                    5 - value
                }
            })
            .sum();

        f64::from(sum) * SUS_SCALE
    }

    /// Validate raw answers strictly, then score them
    pub fn score_raw(values: &[Option<i64>]) -> Result<f64, ValidationError> {
        Ok(Self::score(&LikertAnswers::from_slice(values)?))
    }

    /// Mean, band and distribution over per-respondent scores
    pub fn aggregate(scores: &[f64]) -> AggregateOutcome {
        if scores.is_empty() {
            return AggregateOutcome::InsufficientData;
        }

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut histogram = [0usize; HISTOGRAM_BUCKETS];
        for score in scores {
            let bucket = ((score / 10.0).floor() as usize).min(HISTOGRAM_BUCKETS - 1);
            histogram[bucket] += 1;
        }

        AggregateOutcome::Scored(AggregateScore {
            mean,
            band: UsabilityBand::from_score(mean),
            respondents: scores.len(),
            min,
            max,
            histogram,
        })
    }
}
