//! Token service configuration

use libris_shared::config::TokenSecretsConfig;

/// Configuration for the token lifecycle service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Per-kind signing secrets
    pub secrets: TokenSecretsConfig,

    /// Lifetime of the refresh token issued at login, in seconds
    pub login_refresh_ttl_seconds: u64,

    /// Minimum remaining lifetime a refresh token must have to be rotated,
    /// in seconds; rotations below this floor are refused
    pub rotation_floor_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secrets: TokenSecretsConfig::default(),
            login_refresh_ttl_seconds: 3600,
            rotation_floor_seconds: 900,
        }
    }
}

impl TokenServiceConfig {
    /// Build from already-loaded secrets, keeping the default timings
    pub fn with_secrets(secrets: TokenSecretsConfig) -> Self {
        Self {
            secrets,
            ..Self::default()
        }
    }
}
