use crate::core::normalize::{ScoreRange, UNIT_SCALE};
use crate::core::outcome;
use crate::core::{AnalysisContext, PillarEvaluator, PillarOutcome, Result, SubScore};
use crate::domain::model::PillarId;
use crate::domain::ports::{NearbyQuery, Place, PlaceSearch};
use async_trait::async_trait;
use serde_json::json;

const COMPETITOR_COUNT: ScoreRange = ScoreRange::inverted(0.0, 20.0);
const COMPETITOR_RATING: ScoreRange = ScoreRange::inverted(1.0, 5.0);
const COMPETITORS_PER_KM2: ScoreRange = ScoreRange::inverted(0.0, 100.0);

/// Assumed rating when no competitor has one.
const DEFAULT_RATING: f64 = 3.0;
const LISTED_COMPETITORS: usize = 5;

/// Pillar A: Competition & Saturation.
pub struct CompetitionPillar<P: PlaceSearch> {
    places: P,
}

impl<P: PlaceSearch> CompetitionPillar<P> {
    pub fn new(places: P) -> Self {
        Self { places }
    }

    async fn measure(&self, ctx: &AnalysisContext) -> Result<PillarOutcome> {
        let place_type = ctx.industry.kind.competitor_place_type();
        let query = NearbyQuery::around(&ctx.location, ctx.radius_m).of_type(place_type);
        let competitors = self.places.nearby(&query).await?;

        let competitor_count = competitors.len() as f64;
        let avg_rating = average_rating(&competitors);
        let area_km2 = std::f64::consts::PI * (ctx.radius_m as f64).powi(2) / 1_000_000.0;
        let density_per_km2 = competitor_count / area_km2;

        let a1 = COMPETITOR_COUNT.score(competitor_count);
        let a2 = COMPETITOR_RATING.score(avg_rating);
        let a3 = COMPETITORS_PER_KM2.score(density_per_km2);
        // Weak or few competitors leave more room; derived from A.1 and A.2.
        let a4 = UNIT_SCALE.score((a1 + a2) / 2.0);

        let labels = PillarId::A.sub_score_labels();
        let sub_scores = vec![
            SubScore::new(labels[0].0, labels[0].1, a1),
            SubScore::new(labels[1].0, labels[1].1, a2),
            SubScore::new(labels[2].0, labels[2].1, a3),
            SubScore::derived(labels[3].0, labels[3].1, a4),
        ];

        let listed: Vec<_> = competitors
            .iter()
            .take(LISTED_COMPETITORS)
            .map(|p| {
                json!({
                    "name": p.name,
                    "rating": p.rating,
                    "user_ratings_total": p.user_ratings_total,
                })
            })
            .collect();

        Ok(outcome::scored(
            PillarId::A,
            sub_scores,
            json!({
                "place_type": place_type,
                "competitor_count": competitors.len(),
                "avg_rating": avg_rating,
                "density_per_km2": density_per_km2,
                "competitors": listed,
            }),
        ))
    }
}

fn average_rating(places: &[Place]) -> f64 {
    let ratings: Vec<f64> = places
        .iter()
        .filter_map(|p| p.rating)
        .filter(|r| *r > 0.0)
        .collect();
    if ratings.is_empty() {
        DEFAULT_RATING
    } else {
        ratings.iter().sum::<f64>() / ratings.len() as f64
    }
}

#[async_trait]
impl<P: PlaceSearch> PillarEvaluator for CompetitionPillar<P> {
    fn pillar(&self) -> PillarId {
        PillarId::A
    }

    async fn evaluate(&self, ctx: &AnalysisContext) -> PillarOutcome {
        match self.measure(ctx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Pillar A analysis failed: {}", e);
                outcome::degraded(PillarId::A, e.to_string())
            }
        }
    }
}
