use crate::core::normalize::ScoreRange;
use crate::core::outcome;
use crate::core::{AnalysisContext, PillarEvaluator, PillarOutcome, Result, SubScore};
use crate::domain::model::PillarId;
use crate::domain::ports::{NearbyQuery, Place, PlaceSearch};
use async_trait::async_trait;
use serde_json::json;

const PARKING_COUNT: ScoreRange = ScoreRange::new(0.0, 10.0);
const SAFETY_FACILITIES: ScoreRange = ScoreRange::new(0.0, 3.0);
const PARK_COUNT: ScoreRange = ScoreRange::new(0.0, 5.0);

const SAFETY_RADIUS_M: u32 = 1000;

/// Pillar D: Infrastructure & Environment.
pub struct InfrastructurePillar<P: PlaceSearch> {
    places: P,
}

impl<P: PlaceSearch> InfrastructurePillar<P> {
    pub fn new(places: P) -> Self {
        Self { places }
    }

    async fn measure(&self, ctx: &AnalysisContext) -> Result<PillarOutcome> {
        let parking_query = NearbyQuery::around(&ctx.location, ctx.radius_m).of_type("parking");
        let safety_query = NearbyQuery::around(&ctx.location, SAFETY_RADIUS_M).of_type("police");
        let park_query = NearbyQuery::around(&ctx.location, ctx.radius_m).of_type("park");

        let (parking, safety, parks) = tokio::try_join!(
            self.places.nearby(&parking_query),
            self.places.nearby(&safety_query),
            self.places.nearby(&park_query),
        )?;

        let labels = PillarId::D.sub_score_labels();
        let sub_scores = vec![
            SubScore::new(labels[0].0, labels[0].1, PARKING_COUNT.score(parking.len() as f64)),
            SubScore::new(labels[1].0, labels[1].1, SAFETY_FACILITIES.score(safety.len() as f64)),
            SubScore::new(labels[2].0, labels[2].1, PARK_COUNT.score(parks.len() as f64)),
        ];

        Ok(outcome::scored(
            PillarId::D,
            sub_scores,
            json!({
                "parking_count": parking.len(),
                "safety_facilities": safety.len(),
                "parks_count": parks.len(),
                "nearby_amenities": {
                    "parking": names(&parking, 3),
                    "safety": names(&safety, 2),
                    "parks": names(&parks, 2),
                },
            }),
        ))
    }
}

fn names(places: &[Place], limit: usize) -> Vec<&str> {
    places.iter().take(limit).map(|p| p.name.as_str()).collect()
}

#[async_trait]
impl<P: PlaceSearch> PillarEvaluator for InfrastructurePillar<P> {
    fn pillar(&self) -> PillarId {
        PillarId::D
    }

    async fn evaluate(&self, ctx: &AnalysisContext) -> PillarOutcome {
        match self.measure(ctx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Pillar D analysis failed: {}", e);
                outcome::degraded(PillarId::D, e.to_string())
            }
        }
    }
}
