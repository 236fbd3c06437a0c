pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;
pub use config::EngineConfig;

pub use app::service::{AnalysisService, AnalyzeRequest, ConfiguredService};
pub use core::engine::{EngineSettings, PillarSet, ScoringEngine};
pub use domain::model::{
    AnalysisResult, AnalysisSummary, Industry, IndustryKind, Location, Page, PillarId,
    RiskAlert, RiskTier, WeightVector,
};
pub use utils::error::{Result, ScoringError};
