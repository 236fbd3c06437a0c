use crate::core::normalize::ScoreRange;
use crate::core::outcome;
use crate::core::{AnalysisContext, PillarEvaluator, PillarOutcome, Result, SubScore};
use crate::domain::model::PillarId;
use crate::domain::ports::DemographicSource;
use async_trait::async_trait;
use serde_json::json;

const CUSTOMER_MATCH: ScoreRange = ScoreRange::new(0.0, 100.0);
const POPULATION_DENSITY: ScoreRange = ScoreRange::new(0.0, 10_000.0);
const INCOME_LEVEL: ScoreRange = ScoreRange::new(10_000.0, 100_000.0);

/// Pillar C: Socio-Economic. Does not depend on the search radius.
pub struct SocioEconomicPillar<D: DemographicSource> {
    demographics: D,
}

impl<D: DemographicSource> SocioEconomicPillar<D> {
    pub fn new(demographics: D) -> Self {
        Self { demographics }
    }

    async fn measure(&self, ctx: &AnalysisContext) -> Result<PillarOutcome> {
        let profile = self
            .demographics
            .profile(&ctx.location, &ctx.industry)
            .await?;

        let labels = PillarId::C.sub_score_labels();
        let sub_scores = vec![
            SubScore::new(labels[0].0, labels[0].1, CUSTOMER_MATCH.score(profile.customer_match)),
            SubScore::new(
                labels[1].0,
                labels[1].1,
                POPULATION_DENSITY.score(profile.population_density),
            ),
            SubScore::new(labels[2].0, labels[2].1, INCOME_LEVEL.score(profile.income_level)),
        ];

        let mut raw = json!({
            "customer_match": profile.customer_match,
            "population_density": profile.population_density,
            "income_level": profile.income_level,
            "industry": ctx.industry.kind,
            "industry_sub_type": ctx.industry.sub_type,
        });
        if self.demographics.is_simulated() {
            raw["note"] = json!("simulated demographic data");
        }

        Ok(outcome::scored(PillarId::C, sub_scores, raw))
    }
}

#[async_trait]
impl<D: DemographicSource> PillarEvaluator for SocioEconomicPillar<D> {
    fn pillar(&self) -> PillarId {
        PillarId::C
    }

    async fn evaluate(&self, ctx: &AnalysisContext) -> PillarOutcome {
        match self.measure(ctx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Pillar C analysis failed: {}", e);
                outcome::degraded(PillarId::C, e.to_string())
            }
        }
    }
}
