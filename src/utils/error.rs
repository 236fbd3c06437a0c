use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeightError {
    #[error("weight '{name}' must be within [0, 1], got {value}")]
    OutOfRange { name: &'static str, value: f64 },

    #[error("weights must sum to 1.0 (±{tolerance}), got {sum}")]
    BadSum { sum: f64, tolerance: f64 },
}

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Validation failed for {field}: {reason} (got {value})")]
    ValidationFailed {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid weights: {0}")]
    InvalidWeights(#[from] WeightError),

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Analysis not found: {id}")]
    NotFound { id: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Upstream data error: {message}")]
    UpstreamError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: {reason} (got '{value}')")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Authorization,
    Upstream,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScoringError {
    pub fn validation(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        ScoringError::ValidationFailed {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        ScoringError::UpstreamError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ScoringError::ValidationFailed { .. } | ScoringError::InvalidWeights(_) => {
                ErrorCategory::Validation
            }
            ScoringError::Unauthorized { .. } => ErrorCategory::Authorization,
            ScoringError::ApiError(_) | ScoringError::UpstreamError { .. } => {
                ErrorCategory::Upstream
            }
            ScoringError::NotFound { .. }
            | ScoringError::IoError(_)
            | ScoringError::SerializationError(_) => ErrorCategory::Storage,
            ScoringError::ConfigError { .. } | ScoringError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Authorization | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => match self {
                ScoringError::NotFound { .. } => ErrorSeverity::Low,
                _ => ErrorSeverity::Critical,
            },
        }
    }

    /// True for the errors the engine is allowed to surface before any pillar runs.
    pub fn is_validation_failure(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScoringError::ValidationFailed { .. } => {
                "Check latitude [-90, 90], longitude [-180, 180] and radius [100, 5000]"
            }
            ScoringError::InvalidWeights(_) => {
                "Provide five weights between 0 and 1 that sum to 1.0"
            }
            ScoringError::Unauthorized { .. } => "Pass a valid token with --token",
            ScoringError::NotFound { .. } => "List your analyses with the history command",
            ScoringError::ApiError(_) | ScoringError::UpstreamError { .. } => {
                "Check the place search endpoint and API key"
            }
            ScoringError::IoError(_) | ScoringError::SerializationError(_) => {
                "Check that the storage directory exists and is writable"
            }
            ScoringError::ConfigError { .. } | ScoringError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and try again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScoringError::ValidationFailed { field, reason, .. } => {
                format!("Invalid input '{}': {}", field, reason)
            }
            ScoringError::InvalidWeights(e) => format!("Invalid weights: {}", e),
            ScoringError::Unauthorized { .. } => "You are not authorized".to_string(),
            ScoringError::NotFound { id } => format!("Analysis {} not found", id),
            ScoringError::ConfigError { message } => format!("Configuration problem: {}", message),
            ScoringError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration problem in '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoringError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_errors_are_validation_failures() {
        let err: ScoringError = WeightError::BadSum {
            sum: 1.5,
            tolerance: 0.01,
        }
        .into();
        assert!(err.is_validation_failure());
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            ScoringError::Unauthorized {
                message: "bad token".to_string()
            }
            .category(),
            ErrorCategory::Authorization
        );
        assert_eq!(
            ScoringError::upstream("status REQUEST_DENIED").category(),
            ErrorCategory::Upstream
        );
        assert_eq!(
            ScoringError::NotFound { id: "x".to_string() }.severity(),
            ErrorSeverity::Low
        );
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = ScoringError::validation("radius", 50, "must be between 100 and 5000");
        assert!(err.user_friendly_message().contains("radius"));
        assert!(err.to_string().contains("got 50"));
    }
}
