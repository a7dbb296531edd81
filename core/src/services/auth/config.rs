//! Authentication service configuration

/// Configuration for the authentication flows
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Base URL for mailed password-reset links; the reset token id is
    /// appended as the `reset` query parameter
    pub reset_link_base: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            reset_link_base: String::from("http://localhost:3000/reset-password"),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            reset_link_base: std::env::var("RESET_LINK_BASE").unwrap_or(defaults.reset_link_base),
        }
    }

    /// Build the full reset link for a token id
    pub fn reset_link(&self, token_id: uuid::Uuid) -> String {
        format!("{}?reset={}", self.reset_link_base, token_id)
    }
}
