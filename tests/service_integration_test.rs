use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;
use site_score::utils::validation::Validate;
use site_score::{
    AnalyzeRequest, ConfiguredService, EngineConfig, Industry, IndustryKind, Location,
    ScoringError, WeightVector,
};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, server: &MockServer) -> Result<EngineConfig> {
    let storage = dir.path().join("analyses");
    let content = format!(
        r#"
[engine]
pillar_timeout_ms = 5000
default_radius_m = 800

[places]
endpoint = "{}"
api_key = "integration-key"
timeout_seconds = 5

[storage]
path = "{}"

[auth.tokens]
"alice-token" = "alice"
"bob-token" = "bob"
"#,
        server.url("/nearby"),
        storage.display()
    );
    let path = dir.path().join("site-score.toml");
    fs::write(&path, content)?;

    let config = EngineConfig::from_file(&path)?;
    config.validate()?;
    Ok(config)
}

fn request(lat: f64, address: &str) -> AnalyzeRequest {
    AnalyzeRequest {
        location: Location::new(lat, 106.7).with_address(address),
        industry: Industry::new(IndustryKind::FoodAndBeverage).with_sub_type("cafe"),
        radius_m: 800,
        weights: None,
    }
}

fn mock_places(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/nearby");
        then.status(200).json_body(json!({
            "status": "OK",
            "results": [
                {"name": "Corner Cafe", "rating": 4.0},
                {"name": "Bus Stop 12"}
            ]
        }));
    });
}

#[tokio::test]
async fn test_analyze_history_and_show() -> Result<()> {
    let server = MockServer::start();
    mock_places(&server);
    let dir = TempDir::new()?;
    let config = write_config(&dir, &server)?;
    let service = ConfiguredService::from_config(&config)?;

    let mut ids = Vec::new();
    for (i, address) in ["First St", "Second St", "Third St"].iter().enumerate() {
        let result = service
            .analyze("Bearer alice-token", request(10.0 + i as f64, address))
            .await?;
        assert!(result.metadata.degraded.is_empty());
        ids.push(result.id);
    }

    let page = service.history("alice-token", Some(1), Some(2)).await?;
    assert_eq!(page.total, 3);
    assert_eq!(page.pages, 2);
    assert_eq!(page.items.len(), 2);

    let second = service.history("alice-token", Some(2), Some(2)).await?;
    assert_eq!(second.items.len(), 1);

    let shown = service.get("alice-token", ids[1]).await?;
    assert_eq!(shown.location.address.as_deref(), Some("Second St"));
    assert_eq!(shown.industry.sub_type.as_deref(), Some("cafe"));

    assert!(dir
        .path()
        .join("analyses")
        .join("alice")
        .join(format!("{}.json", ids[0]))
        .exists());
    Ok(())
}

#[tokio::test]
async fn test_authorization_and_scoping() -> Result<()> {
    let server = MockServer::start();
    mock_places(&server);
    let dir = TempDir::new()?;
    let config = write_config(&dir, &server)?;
    let service = ConfiguredService::from_config(&config)?;

    let err = service
        .analyze("stolen-token", request(10.0, "First St"))
        .await
        .unwrap_err();
    assert!(matches!(err, ScoringError::Unauthorized { .. }));

    let result = service.analyze("alice-token", request(10.0, "First St")).await?;
    let err = service.get("bob-token", result.id).await.unwrap_err();
    assert!(matches!(err, ScoringError::NotFound { .. }));
    Ok(())
}

#[tokio::test]
async fn test_invalid_weights_are_not_stored() -> Result<()> {
    let server = MockServer::start();
    mock_places(&server);
    let dir = TempDir::new()?;
    let config = write_config(&dir, &server)?;
    let service = ConfiguredService::from_config(&config)?;

    let mut bad = request(10.0, "First St");
    bad.weights = Some(WeightVector::new(0.5, 0.5, 0.5, 0.0, 0.0));
    let err = service.analyze("alice-token", bad).await.unwrap_err();
    assert!(matches!(err, ScoringError::InvalidWeights(_)));

    assert_eq!(service.history("alice-token", None, None).await?.total, 0);
    Ok(())
}
