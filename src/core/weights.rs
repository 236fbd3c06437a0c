use crate::core::normalize::round2;
use crate::domain::model::{PillarId, WeightVector};
use crate::utils::error::WeightError;

pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Checks every weight is within [0, 1] and that they sum to 1.0 within tolerance.
pub fn validate_weights(weights: &WeightVector) -> Result<(), WeightError> {
    for (name, value) in weights.named() {
        if !(0.0..=1.0).contains(&value) {
            return Err(WeightError::OutOfRange { name, value });
        }
    }

    let sum = weights.sum();
    // Small epsilon so that e.g. 0.99 is not rejected by float noise.
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE + 1e-9 {
        return Err(WeightError::BadSum {
            sum,
            tolerance: WEIGHT_SUM_TOLERANCE,
        });
    }

    Ok(())
}

/// Weighted sum of pillar scores, rounded to 2 decimals.
pub fn combine<I>(pillar_scores: I, weights: &WeightVector) -> f64
where
    I: IntoIterator<Item = (PillarId, f64)>,
{
    let total: f64 = pillar_scores
        .into_iter()
        .map(|(pillar, score)| score * weights.get(pillar))
        .sum();
    round2(total)
}
