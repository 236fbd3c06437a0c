use crate::core::normalize::{ScoreRange, UNIT_SCALE};
use crate::core::outcome;
use crate::core::{AnalysisContext, PillarEvaluator, PillarOutcome, Result, SubScore};
use crate::domain::model::PillarId;
use crate::domain::ports::{NearbyQuery, PlaceSearch};
use async_trait::async_trait;
use serde_json::json;

const POI_COUNT: ScoreRange = ScoreRange::new(0.0, 50.0);
const TRANSIT_COUNT: ScoreRange = ScoreRange::new(0.0, 5.0);
const PARKING_COUNT: ScoreRange = ScoreRange::new(0.0, 10.0);

/// Transit is only useful within walking distance, whatever the search radius.
const TRANSIT_RADIUS_M: u32 = 500;
const VISIBILITY_BONUS: f64 = 2.0;

/// Pillar B: Traffic & Accessibility.
pub struct TrafficPillar<P: PlaceSearch> {
    places: P,
}

impl<P: PlaceSearch> TrafficPillar<P> {
    pub fn new(places: P) -> Self {
        Self { places }
    }

    async fn measure(&self, ctx: &AnalysisContext) -> Result<PillarOutcome> {
        let poi_query = NearbyQuery::around(&ctx.location, ctx.radius_m);
        let transit_query =
            NearbyQuery::around(&ctx.location, TRANSIT_RADIUS_M).of_type("transit_station");
        let parking_query = NearbyQuery::around(&ctx.location, ctx.radius_m).of_type("parking");

        let (pois, transit, parking) = tokio::try_join!(
            self.places.nearby(&poi_query),
            self.places.nearby(&transit_query),
            self.places.nearby(&parking_query),
        )?;

        let b1 = POI_COUNT.score(pois.len() as f64);
        let b2 = TRANSIT_COUNT.score(transit.len() as f64);
        let b3 = PARKING_COUNT.score(parking.len() as f64);
        // Footfall and transit as a visibility proxy, capped at 10 by the scale.
        let b4 = UNIT_SCALE.score((b1 + b2) / 2.0 + VISIBILITY_BONUS);

        let labels = PillarId::B.sub_score_labels();
        let sub_scores = vec![
            SubScore::new(labels[0].0, labels[0].1, b1),
            SubScore::new(labels[1].0, labels[1].1, b2),
            SubScore::new(labels[2].0, labels[2].1, b3),
            SubScore::derived(labels[3].0, labels[3].1, b4),
        ];

        let nearby_transit: Vec<_> = transit
            .iter()
            .take(3)
            .map(|p| json!({ "name": p.name, "types": p.types }))
            .collect();

        Ok(outcome::scored(
            PillarId::B,
            sub_scores,
            json!({
                "total_pois": pois.len(),
                "transit_count": transit.len(),
                "parking_count": parking.len(),
                "nearby_transit": nearby_transit,
            }),
        ))
    }
}

#[async_trait]
impl<P: PlaceSearch> PillarEvaluator for TrafficPillar<P> {
    fn pillar(&self) -> PillarId {
        PillarId::B
    }

    async fn evaluate(&self, ctx: &AnalysisContext) -> PillarOutcome {
        match self.measure(ctx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Pillar B analysis failed: {}", e);
                outcome::degraded(PillarId::B, e.to_string())
            }
        }
    }
}
