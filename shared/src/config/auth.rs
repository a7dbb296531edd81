//! Token signing secret configuration

use serde::{Deserialize, Serialize};

/// Signing secrets for the three token kinds
///
/// Each token kind is signed with its own secret so a leaked access token
/// secret cannot be used to forge refresh or reset tokens.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenSecretsConfig {
    /// Secret for access tokens
    pub access_secret: String,

    /// Secret for refresh tokens
    pub refresh_secret: String,

    /// Secret for password-reset tokens
    pub reset_secret: String,
}

impl Default for TokenSecretsConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from("access-secret-change-in-production"),
            refresh_secret: String::from("refresh-secret-change-in-production"),
            reset_secret: String::from("reset-secret-change-in-production"),
        }
    }
}

impl TokenSecretsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_secret: std::env::var("ACCESS_TOKEN_SECRET")
                .unwrap_or(defaults.access_secret),
            refresh_secret: std::env::var("REFRESH_TOKEN_SECRET")
                .unwrap_or(defaults.refresh_secret),
            reset_secret: std::env::var("RESET_TOKEN_SECRET").unwrap_or(defaults.reset_secret),
        }
    }

    /// Check if any default secret is still in use (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        let defaults = Self::default();
        self.access_secret == defaults.access_secret
            || self.refresh_secret == defaults.refresh_secret
            || self.reset_secret == defaults.reset_secret
    }
}
