pub mod engine;
pub mod normalize;
pub mod outcome;
pub mod risk_gate;
pub mod weights;

pub use crate::domain::model::{AnalysisResult, PillarOutcome, PillarResult, SubScore};
pub use crate::domain::ports::{AnalysisContext, PillarEvaluator};
pub use crate::utils::error::Result;
