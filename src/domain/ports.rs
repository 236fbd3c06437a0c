use crate::domain::model::{
    AnalysisResult, AnalysisSummary, Industry, Location, Page, PillarId, PillarOutcome,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use uuid::Uuid;

/// Inputs shared by every pillar evaluation of one analysis.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    pub location: Location,
    pub industry: Industry,
    pub radius_m: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: u32,
    pub place_type: Option<String>,
}

impl NearbyQuery {
    pub fn around(location: &Location, radius_m: u32) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
            radius_m,
            place_type: None,
        }
    }

    pub fn of_type(mut self, place_type: &str) -> Self {
        self.place_type = Some(place_type.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemographicProfile {
    /// 0-100 match between local demographics and the industry's customers.
    pub customer_match: f64,
    /// People per km².
    pub population_density: f64,
    /// Average household income.
    pub income_level: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanningOutlook {
    /// 0-100, higher means more planning/zoning risk.
    pub planning_risk: f64,
    pub future_development: f64,
    pub economic_outlook: f64,
}

pub trait PlaceSearch: Send + Sync {
    fn nearby(
        &self,
        query: &NearbyQuery,
    ) -> impl Future<Output = Result<Vec<Place>>> + Send;
}

pub trait DemographicSource: Send + Sync {
    fn profile(
        &self,
        location: &Location,
        industry: &Industry,
    ) -> impl Future<Output = Result<DemographicProfile>> + Send;

    /// Whether the figures are synthetic rather than sourced.
    fn is_simulated(&self) -> bool {
        false
    }
}

pub trait PlanningRiskSource: Send + Sync {
    fn outlook(&self, location: &Location) -> impl Future<Output = Result<PlanningOutlook>> + Send;

    fn is_simulated(&self) -> bool {
        false
    }
}

#[async_trait]
pub trait PillarEvaluator: Send + Sync {
    fn pillar(&self) -> PillarId;

    /// Never fails; unavailable data resolves to a degraded outcome.
    async fn evaluate(&self, ctx: &AnalysisContext) -> PillarOutcome;
}

pub trait IdentityVerifier: Send + Sync {
    /// Resolves a bearer credential to a user id.
    fn verify(&self, credential: &str) -> impl Future<Output = Result<String>> + Send;
}

pub trait AnalysisStore: Send + Sync {
    fn save(
        &self,
        user_id: &str,
        result: &AnalysisResult,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Newest first. `page` is 1-based.
    fn list(
        &self,
        user_id: &str,
        page: usize,
        limit: usize,
    ) -> impl Future<Output = Result<Page<AnalysisSummary>>> + Send;

    fn find(
        &self,
        user_id: &str,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<AnalysisResult>>> + Send;
}
