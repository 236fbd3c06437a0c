use crate::domain::model::{Industry, IndustryKind, Location};
use crate::domain::ports::{AnalysisContext, NearbyQuery, Place, PlaceSearch};
use crate::utils::error::{Result, ScoringError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub fn context(radius_m: u32) -> AnalysisContext {
    AnalysisContext {
        location: Location::new(10.7769, 106.7009),
        industry: Industry::new(IndustryKind::FoodAndBeverage),
        radius_m,
    }
}

pub fn named(count: usize) -> Vec<Place> {
    (1..=count)
        .map(|i| Place {
            name: format!("Place {}", i),
            ..Place::default()
        })
        .collect()
}

/// Canned results keyed by place type (`None` for untyped searches).
#[derive(Clone, Default)]
pub struct FixedPlaces {
    results: HashMap<Option<String>, Vec<Place>>,
    queries: Arc<Mutex<Vec<NearbyQuery>>>,
}

impl FixedPlaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, place_type: &str, places: Vec<Place>) -> Self {
        self.results.insert(Some(place_type.to_string()), places);
        self
    }

    pub fn with_untyped(mut self, places: Vec<Place>) -> Self {
        self.results.insert(None, places);
        self
    }

    pub fn queries(&self) -> Vec<NearbyQuery> {
        self.queries.lock().unwrap().clone()
    }
}

impl PlaceSearch for FixedPlaces {
    async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<Place>> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(self
            .results
            .get(&query.place_type)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Clone)]
pub struct FailingPlaces;

impl PlaceSearch for FailingPlaces {
    async fn nearby(&self, _query: &NearbyQuery) -> Result<Vec<Place>> {
        Err(ScoringError::upstream("place search unavailable"))
    }
}
