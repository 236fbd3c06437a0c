use crate::adapters::{
    FileAnalysisStore, HttpPlaceSearch, SimulatedDemographics, SimulatedPlanningRisk,
    StaticTokenVerifier,
};
use crate::app::pillars::standard_pillars;
use crate::config::EngineConfig;
use crate::core::engine::ScoringEngine;
use crate::domain::model::{AnalysisResult, AnalysisSummary, Industry, Location, Page, WeightVector};
use crate::domain::ports::{AnalysisStore, IdentityVerifier};
use crate::utils::error::{Result, ScoringError};
use crate::utils::validation::validate_range;
use uuid::Uuid;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub location: Location,
    pub industry: Industry,
    pub radius_m: u32,
    pub weights: Option<WeightVector>,
}

/// Calling layer around the engine: resolves identity, persists results and
/// serves the user's history.
pub struct AnalysisService<V: IdentityVerifier, S: AnalysisStore> {
    engine: ScoringEngine,
    verifier: V,
    store: S,
}

impl<V: IdentityVerifier, S: AnalysisStore> AnalysisService<V, S> {
    pub fn new(engine: ScoringEngine, verifier: V, store: S) -> Self {
        Self {
            engine,
            verifier,
            store,
        }
    }

    pub async fn analyze(&self, credential: &str, request: AnalyzeRequest) -> Result<AnalysisResult> {
        let user_id = self.verifier.verify(credential).await?;

        let result = self
            .engine
            .analyze(
                request.location,
                request.industry,
                request.radius_m,
                request.weights,
            )
            .await?;

        self.store.save(&user_id, &result).await?;
        tracing::info!("Saved analysis {} for user {}", result.id, user_id);

        Ok(result)
    }

    pub async fn history(
        &self,
        credential: &str,
        page: Option<usize>,
        limit: Option<usize>,
    ) -> Result<Page<AnalysisSummary>> {
        let user_id = self.verifier.verify(credential).await?;

        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        validate_range("page", page, 1, usize::MAX)?;
        validate_range("limit", limit, 1, MAX_LIMIT)?;

        self.store.list(&user_id, page, limit).await
    }

    pub async fn get(&self, credential: &str, id: Uuid) -> Result<AnalysisResult> {
        let user_id = self.verifier.verify(credential).await?;

        self.store
            .find(&user_id, id)
            .await?
            .ok_or_else(|| ScoringError::NotFound { id: id.to_string() })
    }
}

/// The service as wired from a configuration file.
pub type ConfiguredService = AnalysisService<StaticTokenVerifier, FileAnalysisStore>;

impl ConfiguredService {
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let places = HttpPlaceSearch::new(
            config.places.endpoint.clone(),
            config.places.api_key.clone(),
            config.places_timeout(),
        );
        let pillars = standard_pillars(places, SimulatedDemographics, SimulatedPlanningRisk)?;
        let engine = ScoringEngine::new(pillars, config.engine_settings());

        Ok(Self::new(
            engine,
            StaticTokenVerifier::new(config.auth.tokens.clone()),
            FileAnalysisStore::new(&config.storage.path),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pillars::testing::FailingPlaces;
    use crate::core::engine::EngineSettings;
    use crate::domain::model::IndustryKind;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> AnalysisService<StaticTokenVerifier, FileAnalysisStore> {
        let pillars =
            standard_pillars(FailingPlaces, SimulatedDemographics, SimulatedPlanningRisk).unwrap();
        let engine = ScoringEngine::new(pillars, EngineSettings::default());
        let tokens = HashMap::from([
            ("alice-token".to_string(), "alice".to_string()),
            ("bob-token".to_string(), "bob".to_string()),
        ]);
        AnalysisService::new(
            engine,
            StaticTokenVerifier::new(tokens),
            FileAnalysisStore::new(dir.path()),
        )
    }

    fn request() -> AnalyzeRequest {
        AnalyzeRequest {
            location: Location::new(10.7769, 106.7009).with_address("District 1"),
            industry: Industry::new(IndustryKind::Retail),
            radius_m: 500,
            weights: None,
        }
    }

    #[tokio::test]
    async fn test_analyze_persists_for_user() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        let result = service.analyze("Bearer alice-token", request()).await.unwrap();
        assert_eq!(result.pillars.len(), 5);
        assert_eq!(result.metadata.degraded.len(), 3);

        let loaded = service.get("alice-token", result.id).await.unwrap();
        assert_eq!(loaded.id, result.id);
        assert_eq!(loaded.total_score, result.total_score);
        assert_eq!(loaded.metadata.degraded, result.metadata.degraded);

        let page = service.history("alice-token", None, None).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].address, "District 1");
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthorized() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        let err = service.analyze("nope", request()).await.unwrap_err();
        assert!(matches!(err, ScoringError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_results_are_scoped_to_user() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        let result = service.analyze("alice-token", request()).await.unwrap();

        let err = service.get("bob-token", result.id).await.unwrap_err();
        assert!(matches!(err, ScoringError::NotFound { .. }));
        assert_eq!(service.history("bob-token", None, None).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_history_rejects_bad_paging() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);

        let err = service.history("alice-token", Some(0), None).await.unwrap_err();
        assert!(err.is_validation_failure());
        let err = service.history("alice-token", None, Some(500)).await.unwrap_err();
        assert!(err.is_validation_failure());
    }

    #[tokio::test]
    async fn test_history_page_past_the_end_is_empty() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        service.analyze("alice-token", request()).await.unwrap();

        let page = service
            .history("alice-token", Some(usize::MAX), Some(10))
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 1);
        assert_eq!(page.page, usize::MAX);
    }
}
