use crate::core::outcome;
use crate::core::risk_gate::{self, GATED_SUB_SCORE};
use crate::core::weights::{combine, validate_weights};
use crate::domain::model::{
    AnalysisMetadata, AnalysisResult, Industry, Location, PillarId, PillarOutcome, WeightVector,
    MAX_RADIUS_M, MIN_RADIUS_M,
};
use crate::domain::ports::{AnalysisContext, PillarEvaluator};
use crate::utils::error::{Result, ScoringError};
use crate::utils::validation::validate_range;
use chrono::Utc;
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const DEFAULT_PILLAR_TIMEOUT: Duration = Duration::from_millis(8000);

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub pillar_timeout: Duration,
    pub default_weights: WeightVector,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            pillar_timeout: DEFAULT_PILLAR_TIMEOUT,
            default_weights: WeightVector::default(),
        }
    }
}

/// The five evaluators, one per pillar slot.
pub struct PillarSet {
    evaluators: [Box<dyn PillarEvaluator>; 5],
}

impl PillarSet {
    /// Evaluators must be given in A..E order.
    pub fn new(
        a: Box<dyn PillarEvaluator>,
        b: Box<dyn PillarEvaluator>,
        c: Box<dyn PillarEvaluator>,
        d: Box<dyn PillarEvaluator>,
        e: Box<dyn PillarEvaluator>,
    ) -> Result<Self> {
        let evaluators = [a, b, c, d, e];
        for (expected, evaluator) in PillarId::ALL.iter().zip(evaluators.iter()) {
            if evaluator.pillar() != *expected {
                return Err(ScoringError::ConfigError {
                    message: format!(
                        "evaluator for pillar {} registered in slot {}",
                        evaluator.pillar(),
                        expected
                    ),
                });
            }
        }
        Ok(Self { evaluators })
    }
}

pub struct ScoringEngine {
    pillars: PillarSet,
    settings: EngineSettings,
}

impl ScoringEngine {
    pub fn new(pillars: PillarSet, settings: EngineSettings) -> Self {
        Self { pillars, settings }
    }

    /// Scores one location. Only input validation can fail; unavailable data
    /// sources degrade their pillar to a neutral result instead.
    pub async fn analyze(
        &self,
        location: Location,
        industry: Industry,
        radius_m: u32,
        weights: Option<WeightVector>,
    ) -> Result<AnalysisResult> {
        let started = Instant::now();
        let weights = weights.unwrap_or(self.settings.default_weights);

        Self::validate_request(&location, radius_m, &weights)?;

        tracing::info!(
            "Starting analysis at {}, {} ({}, radius {}m)",
            location.latitude,
            location.longitude,
            industry.kind,
            radius_m
        );

        let ctx = AnalysisContext {
            location,
            industry,
            radius_m,
        };

        let [a, b, c, d, e] = &self.pillars.evaluators;
        let (oa, ob, oc, od, oe) = tokio::join!(
            self.run_pillar(a.as_ref(), &ctx),
            self.run_pillar(b.as_ref(), &ctx),
            self.run_pillar(c.as_ref(), &ctx),
            self.run_pillar(d.as_ref(), &ctx),
            self.run_pillar(e.as_ref(), &ctx),
        );
        let outcomes = [oa, ob, oc, od, oe];

        let degraded: Vec<PillarId> = outcomes
            .iter()
            .filter(|o| o.is_degraded())
            .map(|o| o.result().pillar)
            .collect();
        if !degraded.is_empty() {
            tracing::warn!("Degraded pillars: {:?}", degraded);
        }

        let pillars: Vec<_> = outcomes.into_iter().map(PillarOutcome::into_result).collect();

        let combined_score = combine(pillars.iter().map(|p| (p.pillar, p.score)), &weights);

        let e1 = pillars
            .iter()
            .find(|p| p.pillar == PillarId::E)
            .and_then(|p| p.sub_score(GATED_SUB_SCORE))
            .unwrap_or(outcome::NEUTRAL_SCORE);
        let gate = risk_gate::apply_risk_gate(combined_score, e1);
        let risk_alert = gate.alert_raised.then(|| risk_gate::critical_alert(e1));

        if gate.alert_raised {
            tracing::warn!(
                "Critical planning risk (E.1 = {}), total capped {} -> {}",
                e1,
                combined_score,
                gate.final_score
            );
        }

        let elapsed = started.elapsed();
        tracing::info!(
            "Analysis completed in {:?}: total {}",
            elapsed,
            gate.final_score
        );

        Ok(AnalysisResult {
            id: Uuid::new_v4(),
            location: ctx.location,
            industry: ctx.industry,
            radius_m: ctx.radius_m,
            pillars,
            combined_score,
            total_score: gate.final_score,
            risk_alert,
            weights,
            metadata: AnalysisMetadata {
                timestamp: Utc::now(),
                elapsed_ms: elapsed.as_millis() as u64,
                degraded,
            },
        })
    }

    fn validate_request(location: &Location, radius_m: u32, weights: &WeightVector) -> Result<()> {
        validate_range("latitude", location.latitude, -90.0, 90.0)?;
        validate_range("longitude", location.longitude, -180.0, 180.0)?;
        validate_range("radius", radius_m, MIN_RADIUS_M, MAX_RADIUS_M)?;
        validate_weights(weights)?;
        Ok(())
    }

    async fn run_pillar(&self, evaluator: &dyn PillarEvaluator, ctx: &AnalysisContext) -> PillarOutcome {
        let pillar = evaluator.pillar();
        let started = Instant::now();

        match tokio::time::timeout(self.settings.pillar_timeout, evaluator.evaluate(ctx)).await {
            Ok(outcome) => {
                tracing::debug!(
                    "Pillar {} finished in {:?} (score {}, degraded: {})",
                    pillar,
                    started.elapsed(),
                    outcome.result().score,
                    outcome.is_degraded()
                );
                outcome
            }
            Err(_) => {
                tracing::warn!(
                    "Pillar {} timed out after {:?}, using neutral scores",
                    pillar,
                    self.settings.pillar_timeout
                );
                outcome::degraded(
                    pillar,
                    format!("timed out after {}ms", self.settings.pillar_timeout.as_millis()),
                )
            }
        }
    }
}
