//! Survey response sets
//!
//! A [`SurveySet`] is the read-only, per-request view of one survey's
//! responses. It is built from snapshot records (as delivered by the external
//! store), applies the configured [`InvalidAnswerPolicy`], and keeps track of
//! every respondent it had to exclude and why.

use crate::config::InvalidAnswerPolicy;
use crate::error::ValidationError;
use crate::scoring::{AggregateOutcome, SusScorer};
use crate::text::normalize;
use crate::types::{LikertAnswers, SurveyId, SUS_ITEM_COUNT};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Answer substituted for missing items under `NeutralMidpoint`
const NEUTRAL_MIDPOINT: i64 = 3;

/// One answer as stored: a number or the Likert label the form displayed
///
/// Spreadsheet exports may write integral answers as floats (`4.0`); any
/// other JSON value is kept so the respondent can be excluded with a reason
/// instead of failing the whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAnswer {
    Value(i64),
    Number(f64),
    Label(String),
    Other(serde_json::Value),
}

impl RawAnswer {
    /// Resolve to an integer; `Ok(None)` for a blank label
    fn resolve(&self, position: usize) -> Result<Option<i64>, ValidationError> {
        let unrecognized = |label: String| ValidationError::UnrecognizedLabel { position, label };

        match self {
            RawAnswer::Value(value) => Ok(Some(*value)),
            RawAnswer::Number(number) => integral(*number)
                .map(Some)
                .ok_or_else(|| unrecognized(number.to_string())),
            RawAnswer::Label(label) => {
                let key = normalize(label);
                if key.is_empty() {
                    return Ok(None);
                }
                if let Ok(value) = key.parse::<i64>() {
                    return Ok(Some(value));
                }
                if let Some(value) = key.parse::<f64>().ok().and_then(integral) {
                    return Ok(Some(value));
                }
                likert_label_value(&key)
                    .map(Some)
                    .ok_or_else(|| unrecognized(label.clone()))
            }
            RawAnswer::Other(value) => Err(unrecognized(value.to_string())),
        }
    }
}

/// Whole-number floats only (`4.0`, not `3.5` or `NaN`)
fn integral(number: f64) -> Option<i64> {
    (number.is_finite() && number.fract() == 0.0 && number.abs() <= i64::MAX as f64)
        .then_some(number as i64)
}

/// Map a normalized form label to its Likert value
fn likert_label_value(key: &str) -> Option<i64> {
    match key {
        "muy en desacuerdo" | "strongly disagree" => Some(1),
        "en desacuerdo" | "disagree" => Some(2),
        "ni de acuerdo ni en desacuerdo" | "neutral" | "neither agree nor disagree" => Some(3),
        "de acuerdo" | "agree" => Some(4),
        "muy de acuerdo" | "strongly agree" => Some(5),
        _ => None,
    }
}

/// Raw response record from the external snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub survey_id: SurveyId,
    pub respondent_id: String,

    /// Who answered (e-mail or handle), when the store records it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respondent: Option<String>,

    /// Ten answers in questionnaire order; `null` for unanswered items
    pub answers: Vec<Option<RawAnswer>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ResponseRecord {
    /// Convenience constructor for numeric answers
    pub fn new(
        survey_id: impl Into<String>,
        respondent_id: impl Into<String>,
        answers: [i64; SUS_ITEM_COUNT],
        comment: Option<&str>,
    ) -> Self {
        Self {
            survey_id: SurveyId::new(survey_id),
            respondent_id: respondent_id.into(),
            respondent: None,
            answers: answers
                .iter()
                .map(|value| Some(RawAnswer::Value(*value)))
                .collect(),
            comment: comment.map(str::to_string),
        }
    }
}

/// A structurally valid response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyResponse {
    pub respondent_id: String,
    pub respondent: Option<String>,
    pub answers: LikertAnswers,
    pub comment: Option<String>,
}

impl SurveyResponse {
    /// SUS score, computed on demand
    pub fn score(&self) -> f64 {
        SusScorer::score(&self.answers)
    }
}

/// A respondent left out of the aggregates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    pub respondent_id: String,
    pub reason: ValidationError,
}

/// Hex SHA-256 over the survey's canonical record serialization
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(pub String);

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only response set for one survey
#[derive(Debug, Clone)]
pub struct SurveySet {
    survey_id: SurveyId,
    responses: Vec<SurveyResponse>,
    exclusions: Vec<Exclusion>,
    imputed_answers: usize,
    content_hash: ContentHash,
}

impl SurveySet {
    /// Build the set for `survey_id` from a snapshot that may mix surveys
    ///
    /// Records of other surveys are ignored (they are not exclusions).
    pub fn from_snapshot(
        survey_id: &SurveyId,
        records: &[ResponseRecord],
        policy: InvalidAnswerPolicy,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(survey_id.as_str().as_bytes());

        let mut responses = Vec::new();
        let mut exclusions = Vec::new();
        let mut imputed_answers = 0;

        for record in records.iter().filter(|r| &r.survey_id == survey_id) {
            // Serializing a plain struct cannot fail
            if let Ok(bytes) = serde_json::to_vec(record) {
                hasher.update(&bytes);
            }

            match resolve_answers(&record.answers, policy) {
                Ok((answers, imputed)) => {
                    imputed_answers += imputed;
                    responses.push(SurveyResponse {
                        respondent_id: record.respondent_id.clone(),
                        respondent: record.respondent.clone(),
                        answers,
                        comment: record.comment.clone(),
                    });
                }
                Err(reason) => {
                    debug!(
                        "Excluding respondent {} from survey {}: {}",
                        record.respondent_id, survey_id, reason
                    );
                    exclusions.push(Exclusion {
                        respondent_id: record.respondent_id.clone(),
                        reason,
                    });
                }
            }
        }

        let content_hash = ContentHash(format!("{:x}", hasher.finalize()));

        Self {
            survey_id: survey_id.clone(),
            responses,
            exclusions,
            imputed_answers,
            content_hash,
        }
    }

    /// Distinct survey ids in order of first appearance
    pub fn survey_ids(records: &[ResponseRecord]) -> Vec<SurveyId> {
        let mut ids: Vec<SurveyId> = Vec::new();
        for record in records {
            if !ids.contains(&record.survey_id) {
                ids.push(record.survey_id.clone());
            }
        }
        ids
    }

    pub fn survey_id(&self) -> &SurveyId {
        &self.survey_id
    }

    pub fn responses(&self) -> &[SurveyResponse] {
        &self.responses
    }

    pub fn exclusions(&self) -> &[Exclusion] {
        &self.exclusions
    }

    /// Missing answers replaced by the neutral midpoint
    pub fn imputed_answers(&self) -> usize {
        self.imputed_answers
    }

    pub fn content_hash(&self) -> &ContentHash {
        &self.content_hash
    }

    /// Valid plus excluded respondents
    pub fn total_records(&self) -> usize {
        self.responses.len() + self.exclusions.len()
    }

    pub fn scores(&self) -> Vec<f64> {
        self.responses.iter().map(SurveyResponse::score).collect()
    }

    pub fn aggregate(&self) -> AggregateOutcome {
        SusScorer::aggregate(&self.scores())
    }
}

/// Apply the policy to one record's raw answers
fn resolve_answers(
    raw: &[Option<RawAnswer>],
    policy: InvalidAnswerPolicy,
) -> Result<(LikertAnswers, usize), ValidationError> {
    if raw.len() != SUS_ITEM_COUNT {
        return Err(ValidationError::WrongAnswerCount { found: raw.len() });
    }

    let mut values = [0i64; SUS_ITEM_COUNT];
    let mut imputed = 0;

    for (index, answer) in raw.iter().enumerate() {
        let position = index + 1;
        let resolved = match answer {
            Some(answer) => answer.resolve(position)?,
            None => None,
        };

        values[index] = match (resolved, policy) {
            (Some(value), _) => value,
            (None, InvalidAnswerPolicy::NeutralMidpoint) => {
                imputed += 1;
                NEUTRAL_MIDPOINT
            }
            (None, InvalidAnswerPolicy::Exclude) => {
                return Err(ValidationError::MissingAnswer { position })
            }
        };
    }

    Ok((LikertAnswers::new(values)?, imputed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey() -> SurveyId {
        SurveyId::new("DASHBOARD_GENERAL")
    }

    fn record_with(answers: Vec<Option<RawAnswer>>) -> ResponseRecord {
        ResponseRecord {
            survey_id: survey(),
            respondent_id: "r-1".to_string(),
            respondent: None,
            answers,
            comment: None,
        }
    }

    #[test]
    fn test_valid_records_are_kept_in_order() {
        let records = vec![
            ResponseRecord::new("DASHBOARD_GENERAL", "a", [5, 1, 5, 1, 5, 1, 5, 1, 5, 1], None),
            ResponseRecord::new("DASHBOARD_GENERAL", "b", [3; 10], Some("Todo bien")),
        ];
        let set = SurveySet::from_snapshot(&survey(), &records, InvalidAnswerPolicy::Exclude);

        assert_eq!(set.responses().len(), 2);
        assert_eq!(set.responses()[0].respondent_id, "a");
        assert_eq!(set.scores(), vec![100.0, 50.0]);
        assert!(set.exclusions().is_empty());
    }

    #[test]
    fn test_other_surveys_are_filtered_not_excluded() {
        let records = vec![
            ResponseRecord::new("DASHBOARD_GENERAL", "a", [3; 10], None),
            ResponseRecord::new("PILOT", "b", [3; 10], None),
        ];
        let set = SurveySet::from_snapshot(&survey(), &records, InvalidAnswerPolicy::Exclude);

        assert_eq!(set.total_records(), 1);
        assert!(set.exclusions().is_empty());
        assert_eq!(
            SurveySet::survey_ids(&records),
            vec![SurveyId::new("DASHBOARD_GENERAL"), SurveyId::new("PILOT")]
        );
    }

    #[test]
    fn test_out_of_range_is_excluded_with_reason() {
        let records = vec![
            ResponseRecord::new("DASHBOARD_GENERAL", "ok", [3; 10], None),
            ResponseRecord::new("DASHBOARD_GENERAL", "bad", [3, 3, 9, 3, 3, 3, 3, 3, 3, 3], None),
        ];
        let set = SurveySet::from_snapshot(&survey(), &records, InvalidAnswerPolicy::NeutralMidpoint);

        assert_eq!(set.responses().len(), 1);
        assert_eq!(
            set.exclusions(),
            &[Exclusion {
                respondent_id: "bad".to_string(),
                reason: ValidationError::OutOfRange {
                    position: 3,
                    value: 9
                },
            }]
        );
    }

    #[test]
    fn test_missing_answer_policy() {
        let mut answers: Vec<Option<RawAnswer>> = vec![Some(RawAnswer::Value(5)); 10];
        answers[1] = None;
        answers[3] = Some(RawAnswer::Label("  ".to_string()));
        let records = vec![record_with(answers)];

        let excluded = SurveySet::from_snapshot(&survey(), &records, InvalidAnswerPolicy::Exclude);
        assert_eq!(excluded.responses().len(), 0);
        assert_eq!(
            excluded.exclusions()[0].reason,
            ValidationError::MissingAnswer { position: 2 }
        );

        let imputed =
            SurveySet::from_snapshot(&survey(), &records, InvalidAnswerPolicy::NeutralMidpoint);
        assert_eq!(imputed.responses().len(), 1);
        assert_eq!(imputed.imputed_answers(), 2);
        assert_eq!(
            imputed.responses()[0].answers.values(),
            &[5, 3, 5, 3, 5, 5, 5, 5, 5, 5]
        );
    }

    #[test]
    fn test_likert_labels_are_accepted() {
        let labels = [
            "Muy de acuerdo",
            "Muy en desacuerdo",
            "De acuerdo",
            "En desacuerdo",
            "Neutral",
            "Ni de acuerdo ni en desacuerdo",
            "5",
            "1",
            "MUY DE ACUERDO",
            "en desacuerdo",
        ];
        let answers = labels
            .iter()
            .map(|label| Some(RawAnswer::Label(label.to_string())))
            .collect();
        let set = SurveySet::from_snapshot(
            &survey(),
            &[record_with(answers)],
            InvalidAnswerPolicy::Exclude,
        );
        assert_eq!(
            set.responses()[0].answers.values(),
            &[5, 1, 4, 2, 3, 3, 5, 1, 5, 2]
        );
    }

    #[test]
    fn test_unknown_label_is_excluded() {
        let mut answers: Vec<Option<RawAnswer>> = vec![Some(RawAnswer::Value(3)); 10];
        answers[9] = Some(RawAnswer::Label("quizas".to_string()));
        let set = SurveySet::from_snapshot(
            &survey(),
            &[record_with(answers)],
            InvalidAnswerPolicy::NeutralMidpoint,
        );
        assert!(matches!(
            set.exclusions()[0].reason,
            ValidationError::UnrecognizedLabel { position: 10, .. }
        ));
    }

    #[test]
    fn test_wrong_answer_count_is_excluded() {
        let set = SurveySet::from_snapshot(
            &survey(),
            &[record_with(vec![Some(RawAnswer::Value(3)); 9])],
            InvalidAnswerPolicy::NeutralMidpoint,
        );
        assert_eq!(
            set.exclusions()[0].reason,
            ValidationError::WrongAnswerCount { found: 9 }
        );
    }

    #[test]
    fn test_content_hash_tracks_changes() {
        let records = vec![ResponseRecord::new("DASHBOARD_GENERAL", "a", [3; 10], None)];
        let first = SurveySet::from_snapshot(&survey(), &records, InvalidAnswerPolicy::Exclude);
        let again = SurveySet::from_snapshot(&survey(), &records, InvalidAnswerPolicy::Exclude);
        assert_eq!(first.content_hash(), again.content_hash());
        assert_eq!(first.content_hash().0.len(), 64);

        let changed = vec![ResponseRecord::new("DASHBOARD_GENERAL", "a", [4; 10], None)];
        let other = SurveySet::from_snapshot(&survey(), &changed, InvalidAnswerPolicy::Exclude);
        assert_ne!(first.content_hash(), other.content_hash());
    }

    #[test]
    fn test_records_deserialize_from_snapshot_json() {
        let json = r#"[{
            "survey_id": "DASHBOARD_GENERAL",
            "respondent_id": "7",
            "respondent": "ana@example.com",
            "answers": [4, "En desacuerdo", 4, 2, null, 2, 4, 2, 4, 2],
            "comment": "Facil de entender"
        }]"#;
        let records: Vec<ResponseRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].answers[1], Some(RawAnswer::Label("En desacuerdo".to_string())));
        assert_eq!(records[0].answers[4], None);

        let set = SurveySet::from_snapshot(&survey(), &records, InvalidAnswerPolicy::NeutralMidpoint);
        // odd: 4,4,3,4,4 -> 14; even: 2,2,2,2,2 -> 15
        assert_eq!(set.scores(), vec![72.5]);
    }

    #[test]
    fn test_float_and_foreign_answers_exclude_only_that_respondent() {
        let json = r#"[
            {"survey_id": "DASHBOARD_GENERAL", "respondent_id": "f", "answers": [4.0, 2, "4.0", 2, 4, 2, 4, 2, 4, 2]},
            {"survey_id": "DASHBOARD_GENERAL", "respondent_id": "h", "answers": [3.5, 2, 4, 2, 4, 2, 4, 2, 4, 2]},
            {"survey_id": "DASHBOARD_GENERAL", "respondent_id": "b", "answers": [4, 2, 4, 2, true, 2, 4, 2, 4, 2]},
            {"survey_id": "DASHBOARD_GENERAL", "respondent_id": "o", "answers": [4, 2, 4, 2, 4, 2, 4, {"v": 4}, 4, 2]}
        ]"#;
        let records: Vec<ResponseRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].answers[0], Some(RawAnswer::Number(4.0)));
        assert_eq!(records[2].answers[4], Some(RawAnswer::Other(serde_json::Value::Bool(true))));

        let set = SurveySet::from_snapshot(&survey(), &records, InvalidAnswerPolicy::Exclude);
        assert_eq!(set.scores(), vec![75.0]);

        let reasons: Vec<_> = set.exclusions().iter().map(|e| e.reason.clone()).collect();
        assert_eq!(
            reasons,
            vec![
                ValidationError::UnrecognizedLabel { position: 1, label: "3.5".to_string() },
                ValidationError::UnrecognizedLabel { position: 5, label: "true".to_string() },
                ValidationError::UnrecognizedLabel { position: 8, label: r#"{"v":4}"#.to_string() },
            ]
        );
    }

    #[test]
    fn test_integral_floats() {
        assert_eq!(integral(4.0), Some(4));
        assert_eq!(integral(-0.0), Some(0));
        assert_eq!(integral(3.5), None);
        assert_eq!(integral(f64::NAN), None);
        assert_eq!(integral(f64::INFINITY), None);
    }
}
