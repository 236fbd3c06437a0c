use crate::adapters::http::DEFAULT_PLACES_ENDPOINT;
use crate::core::engine::{EngineSettings, DEFAULT_PILLAR_TIMEOUT};
use crate::core::weights::validate_weights;
use crate::domain::model::{WeightVector, DEFAULT_RADIUS_M, MAX_RADIUS_M, MIN_RADIUS_M};
use crate::utils::error::{Result, ScoringError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Configuration file layout. Every section is optional and falls back to
/// built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub engine: EngineSection,
    /// Overrides the default pillar weights.
    #[serde(default)]
    pub weights: Option<WeightVector>,
    #[serde(default)]
    pub places: PlacesConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSection {
    #[serde(default = "default_pillar_timeout_ms")]
    pub pillar_timeout_ms: u64,
    #[serde(default = "default_radius_m")]
    pub default_radius_m: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    #[serde(default = "default_places_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_places_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Bearer token -> user id.
    #[serde(default)]
    pub tokens: HashMap<String, String>,
}

fn default_pillar_timeout_ms() -> u64 {
    DEFAULT_PILLAR_TIMEOUT.as_millis() as u64
}

fn default_radius_m() -> u32 {
    DEFAULT_RADIUS_M
}

fn default_places_endpoint() -> String {
    DEFAULT_PLACES_ENDPOINT.to_string()
}

fn default_places_timeout_seconds() -> u64 {
    10
}

fn default_storage_path() -> String {
    "./analyses".to_string()
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            pillar_timeout_ms: default_pillar_timeout_ms(),
            default_radius_m: default_radius_m(),
        }
    }
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            endpoint: default_places_endpoint(),
            api_key: String::new(),
            timeout_seconds: default_places_timeout_seconds(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

impl EngineConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScoringError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScoringError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            pillar_timeout: Duration::from_millis(self.engine.pillar_timeout_ms),
            default_weights: self.weights.unwrap_or_default(),
        }
    }

    pub fn places_timeout(&self) -> Duration {
        Duration::from_secs(self.places.timeout_seconds)
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("engine.pillar_timeout_ms", self.engine.pillar_timeout_ms, 1)?;

        let radius = self.engine.default_radius_m;
        if !(MIN_RADIUS_M..=MAX_RADIUS_M).contains(&radius) {
            return Err(ScoringError::InvalidConfigValueError {
                field: "engine.default_radius_m".to_string(),
                value: radius.to_string(),
                reason: format!("Value must be between {} and {}", MIN_RADIUS_M, MAX_RADIUS_M),
            });
        }

        if let Some(weights) = &self.weights {
            validate_weights(weights)?;
        }

        validate_url("places.endpoint", &self.places.endpoint)?;
        validate_positive_number("places.timeout_seconds", self.places.timeout_seconds, 1)?;
        if self.places.api_key.is_empty() || self.places.api_key.starts_with("${") {
            tracing::warn!("places.api_key is not set; place-based pillars will fall back to neutral scores");
        }

        validate_path("storage.path", &self.storage.path)?;

        for (token, user_id) in &self.auth.tokens {
            validate_non_empty_string("auth.tokens", token)?;
            validate_non_empty_string(&format!("auth.tokens.{}", token), user_id)?;
        }

        Ok(())
    }
}
