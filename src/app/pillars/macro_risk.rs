use crate::core::normalize::ScoreRange;
use crate::core::outcome;
use crate::core::{AnalysisContext, PillarEvaluator, PillarOutcome, Result, SubScore};
use crate::domain::model::{PillarId, RiskTier};
use crate::domain::ports::PlanningRiskSource;
use async_trait::async_trait;
use serde_json::json;

const PLANNING_RISK: ScoreRange = ScoreRange::inverted(0.0, 100.0);
const FUTURE_DEVELOPMENT: ScoreRange = ScoreRange::new(0.0, 100.0);
const ECONOMIC_OUTLOOK: ScoreRange = ScoreRange::new(0.0, 100.0);

/// Pillar E: Macro & Legal Risk. E.1 feeds the risk gate.
pub struct MacroRiskPillar<R: PlanningRiskSource> {
    planning: R,
}

impl<R: PlanningRiskSource> MacroRiskPillar<R> {
    pub fn new(planning: R) -> Self {
        Self { planning }
    }

    async fn measure(&self, ctx: &AnalysisContext) -> Result<PillarOutcome> {
        let outlook = self.planning.outlook(&ctx.location).await?;

        let e1 = PLANNING_RISK.score(outlook.planning_risk);
        let tier = RiskTier::classify(e1);

        let labels = PillarId::E.sub_score_labels();
        let sub_scores = vec![
            SubScore::new(labels[0].0, labels[0].1, e1),
            SubScore::new(
                labels[1].0,
                labels[1].1,
                FUTURE_DEVELOPMENT.score(outlook.future_development),
            ),
            SubScore::new(
                labels[2].0,
                labels[2].1,
                ECONOMIC_OUTLOOK.score(outlook.economic_outlook),
            ),
        ];

        if tier == RiskTier::Critical {
            tracing::warn!(
                "Critical planning risk at {}, {} (E.1 = {})",
                ctx.location.latitude,
                ctx.location.longitude,
                e1
            );
        }

        let mut raw = json!({
            "planning_risk": outlook.planning_risk,
            "future_development": outlook.future_development,
            "economic_outlook": outlook.economic_outlook,
            "risk_level": tier,
            "warnings": tier.recommendations(),
        });
        if self.planning.is_simulated() {
            raw["note"] = json!("simulated planning data");
        }

        Ok(outcome::scored(PillarId::E, sub_scores, raw))
    }
}

#[async_trait]
impl<R: PlanningRiskSource> PillarEvaluator for MacroRiskPillar<R> {
    fn pillar(&self) -> PillarId {
        PillarId::E
    }

    async fn evaluate(&self, ctx: &AnalysisContext) -> PillarOutcome {
        match self.measure(ctx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Pillar E analysis failed: {}", e);
                outcome::degraded(PillarId::E, e.to_string())
            }
        }
    }
}
