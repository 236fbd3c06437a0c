/// Rounds to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Maps `value` from `[min_range, max_range]` onto 0-10, clamping values outside
/// the range. With `inverse` set, larger raw values score lower.
pub fn normalize(value: f64, min_range: f64, max_range: f64, inverse: bool) -> f64 {
    debug_assert!(
        max_range > min_range,
        "normalize called with empty range [{}, {}]",
        min_range,
        max_range
    );

    let clamped = value.clamp(min_range, max_range);
    let score = (clamped - min_range) / (max_range - min_range) * 10.0;
    let score = if inverse { 10.0 - score } else { score };

    round2(score)
}

/// Fixed normalization bounds of one sub-score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    pub inverse: bool,
}

impl ScoreRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            inverse: false,
        }
    }

    pub const fn inverted(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            inverse: true,
        }
    }

    pub fn score(&self, value: f64) -> f64 {
        normalize(value, self.min, self.max, self.inverse)
    }
}

/// Identity range for sub-scores computed from other 0-10 sub-scores.
pub const UNIT_SCALE: ScoreRange = ScoreRange::new(0.0, 10.0);

/// Arithmetic mean rounded to 2 decimals; 0 for an empty slice.
pub fn mean_score(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    round2(values.iter().sum::<f64>() / values.len() as f64)
}
