use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;
use site_score::adapters::{HttpPlaceSearch, SimulatedDemographics, SimulatedPlanningRisk};
use site_score::app::pillars::standard_pillars;
use site_score::domain::ports::{PlanningOutlook, PlanningRiskSource};
use site_score::{
    EngineSettings, Industry, IndustryKind, Location, PillarId, RiskTier, ScoringEngine,
};
use std::time::Duration;

fn places(server: &MockServer) -> HttpPlaceSearch {
    HttpPlaceSearch::new(server.url("/nearby"), "test-key", Duration::from_secs(5))
}

fn engine<R: PlanningRiskSource + 'static>(server: &MockServer, planning: R) -> Result<ScoringEngine> {
    let pillars = standard_pillars(places(server), SimulatedDemographics, planning)?;
    Ok(ScoringEngine::new(pillars, EngineSettings::default()))
}

fn zero_results(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/nearby").query_param("key", "test-key");
        then.status(200)
            .json_body(json!({"status": "ZERO_RESULTS", "results": []}));
    })
}

#[tokio::test]
async fn test_empty_neighbourhood_end_to_end() -> Result<()> {
    let server = MockServer::start();
    let mock = zero_results(&server);

    let result = engine(&server, SimulatedPlanningRisk)?
        .analyze(
            Location::new(10.0, 20.0),
            Industry::new(IndustryKind::FoodAndBeverage),
            500,
            None,
        )
        .await?;

    // one query for A, three each for B and D
    mock.assert_hits(7);
    assert!(result.metadata.degraded.is_empty());
    assert_eq!(result.pillars.len(), 5);

    let a = result.pillar(PillarId::A).expect("pillar A");
    assert_eq!(a.sub_score("A.1"), Some(10.0));
    assert_eq!(a.sub_score("A.2"), Some(5.0));
    assert_eq!(result.pillar(PillarId::B).map(|p| p.score), Some(0.5));
    assert_eq!(result.pillar(PillarId::C).map(|p| p.score), Some(3.27));
    assert_eq!(result.pillar(PillarId::D).map(|p| p.score), Some(0.0));
    assert_eq!(result.pillar(PillarId::E).map(|p| p.score), Some(5.67));

    assert!(result.risk_alert.is_none());
    assert_eq!(result.total_score, result.combined_score);
    Ok(())
}

#[tokio::test]
async fn test_failing_place_search_degrades_place_pillars() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/nearby");
        then.status(200).json_body(json!({
            "status": "OVER_QUERY_LIMIT",
            "error_message": "quota exceeded"
        }));
    });

    let result = engine(&server, SimulatedPlanningRisk)?
        .analyze(
            Location::new(10.0, 20.0),
            Industry::new(IndustryKind::FoodAndBeverage),
            1000,
            None,
        )
        .await?;

    assert_eq!(
        result.metadata.degraded,
        vec![PillarId::A, PillarId::B, PillarId::D]
    );
    for pillar in [PillarId::A, PillarId::B, PillarId::D] {
        let degraded = result.pillar(pillar).expect("degraded pillar present");
        assert_eq!(degraded.score, 5.0);
        assert_eq!(degraded.raw["degraded"], true);
    }
    // 5*0.3 + 5*0.25 + 3.27*0.3 + 5*0.1 + 5.67*0.05
    assert_eq!(result.total_score, 4.51);
    Ok(())
}

struct RedevelopmentZone;

impl PlanningRiskSource for RedevelopmentZone {
    async fn outlook(&self, _location: &Location) -> site_score::Result<PlanningOutlook> {
        Ok(PlanningOutlook {
            planning_risk: 90.0,
            future_development: 40.0,
            economic_outlook: 70.0,
        })
    }
}

#[tokio::test]
async fn test_critical_planning_risk_caps_total() -> Result<()> {
    let server = MockServer::start();
    zero_results(&server);

    let result = engine(&server, RedevelopmentZone)?
        .analyze(
            Location::new(10.0, 20.0),
            Industry::new(IndustryKind::Service),
            500,
            None,
        )
        .await?;

    let e = result.pillar(PillarId::E).expect("pillar E");
    assert_eq!(e.sub_score("E.1"), Some(1.0));

    let alert = result.risk_alert.as_ref().expect("risk alert");
    assert_eq!(alert.level, RiskTier::Critical);
    assert_eq!(alert.affected_score, "E.1");
    assert_eq!(alert.recommendations.len(), 3);
    assert!(result.total_score <= 5.0);
    assert_eq!(result.total_score, result.combined_score.min(5.0));
    Ok(())
}

#[tokio::test]
async fn test_invalid_radius_makes_no_requests() -> Result<()> {
    let server = MockServer::start();
    let mock = zero_results(&server);

    let err = engine(&server, SimulatedPlanningRisk)?
        .analyze(
            Location::new(10.0, 20.0),
            Industry::new(IndustryKind::Retail),
            50,
            None,
        )
        .await
        .unwrap_err();

    assert!(err.is_validation_failure());
    mock.assert_hits(0);
    Ok(())
}
