use crate::domain::model::{RiskAlert, RiskTier};

pub const CRITICAL_THRESHOLD: f64 = 2.0;
pub const HIGH_THRESHOLD: f64 = 5.0;
pub const CAP: f64 = 5.0;

/// Sub-score whose value drives the gate.
pub const GATED_SUB_SCORE: &str = "E.1";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskGateOutcome {
    pub final_score: f64,
    pub alert_raised: bool,
}

/// Caps `total` at [`CAP`] when the planning-risk sub-score is critical.
/// Only ever lowers the score.
pub fn apply_risk_gate(total: f64, sub_score_e1: f64) -> RiskGateOutcome {
    if sub_score_e1 < CRITICAL_THRESHOLD {
        RiskGateOutcome {
            final_score: total.min(CAP),
            alert_raised: true,
        }
    } else {
        RiskGateOutcome {
            final_score: total,
            alert_raised: false,
        }
    }
}

impl RiskTier {
    pub fn classify(sub_score_e1: f64) -> Self {
        if sub_score_e1 < CRITICAL_THRESHOLD {
            RiskTier::Critical
        } else if sub_score_e1 < HIGH_THRESHOLD {
            RiskTier::High
        } else {
            RiskTier::Acceptable
        }
    }

    pub fn recommendations(&self) -> Vec<String> {
        match self {
            RiskTier::Critical => vec![
                "High urban planning risk detected".to_string(),
                "Potential zoning changes or redevelopment".to_string(),
                "Recommend legal consultation before proceeding".to_string(),
            ],
            RiskTier::High | RiskTier::Acceptable => Vec::new(),
        }
    }
}

pub fn critical_alert(sub_score_e1: f64) -> RiskAlert {
    RiskAlert {
        level: RiskTier::Critical,
        message: format!(
            "High urban planning risk detected. Total score capped at {:.1}/10.",
            CAP
        ),
        affected_score: GATED_SUB_SCORE.to_string(),
        recommendations: RiskTier::classify(sub_score_e1).recommendations(),
    }
}
