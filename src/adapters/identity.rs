use crate::domain::ports::IdentityVerifier;
use crate::utils::error::{Result, ScoringError};
use std::collections::HashMap;

/// Resolves bearer tokens against a fixed token -> user id table.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, String>,
}

impl StaticTokenVerifier {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }
}

impl IdentityVerifier for StaticTokenVerifier {
    async fn verify(&self, credential: &str) -> Result<String> {
        let token = credential.trim();
        let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();

        if token.is_empty() {
            return Err(ScoringError::Unauthorized {
                message: "missing token".to_string(),
            });
        }

        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| ScoringError::Unauthorized {
                message: "unknown token".to_string(),
            })
    }
}
