// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod identity;
pub mod simulated;
pub mod storage;

pub use http::HttpPlaceSearch;
pub use identity::StaticTokenVerifier;
pub use simulated::{SimulatedDemographics, SimulatedPlanningRisk};
pub use storage::FileAnalysisStore;
