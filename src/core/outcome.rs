use crate::core::normalize::mean_score;
use crate::domain::model::{PillarId, PillarOutcome, PillarResult, SubScore};
use serde_json::json;

pub const NEUTRAL_SCORE: f64 = 5.0;

/// Builds a successful outcome; the pillar score is the rounded mean of `sub_scores`.
pub fn scored(pillar: PillarId, sub_scores: Vec<SubScore>, raw: serde_json::Value) -> PillarOutcome {
    let values: Vec<f64> = sub_scores.iter().map(|s| s.value).collect();
    PillarOutcome::Scored(PillarResult {
        pillar,
        name: pillar.name().to_string(),
        score: mean_score(&values),
        sub_scores,
        raw,
    })
}

/// Neutral stand-in used when a pillar could not obtain its measurements.
pub fn degraded(pillar: PillarId, reason: impl Into<String>) -> PillarOutcome {
    let sub_scores = pillar
        .sub_score_labels()
        .iter()
        .map(|(key, label)| SubScore::new(key, label, NEUTRAL_SCORE))
        .collect();

    PillarOutcome::Degraded(PillarResult {
        pillar,
        name: pillar.name().to_string(),
        score: NEUTRAL_SCORE,
        sub_scores,
        raw: json!({
            "error": reason.into(),
            "degraded": true,
        }),
    })
}
