use crate::domain::ports::{NearbyQuery, Place, PlaceSearch};
use crate::utils::error::{Result, ScoringError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_PLACES_ENDPOINT: &str =
    "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    status: String,
    #[serde(default)]
    results: Vec<Place>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Nearby-search client shared by pillars A, B and D. Cloning shares the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpPlaceSearch {
    client: Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl HttpPlaceSearch {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout,
        }
    }
}

impl PlaceSearch for HttpPlaceSearch {
    async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<Place>> {
        let mut params = vec![
            (
                "location",
                format!("{},{}", query.latitude, query.longitude),
            ),
            ("radius", query.radius_m.to_string()),
            ("key", self.api_key.clone()),
        ];
        if let Some(place_type) = &query.place_type {
            params.push(("type", place_type.clone()));
        }

        tracing::debug!(
            "Nearby search: type={:?} radius={}",
            query.place_type,
            query.radius_m
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoringError::upstream(format!(
                "place search returned HTTP {}",
                status
            )));
        }

        let body: NearbyResponse = response.json().await?;
        match body.status.as_str() {
            "OK" | "ZERO_RESULTS" => {
                tracing::debug!("Nearby search returned {} places", body.results.len());
                Ok(body.results)
            }
            other => Err(ScoringError::upstream(match body.error_message {
                Some(message) => format!("place search status {}: {}", other, message),
                None => format!("place search status {}", other),
            })),
        }
    }
}
