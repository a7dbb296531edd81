//! User entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered library user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,

    /// Login name, stored lowercase
    pub username: String,

    /// Email address, stored lowercase
    pub email: String,

    /// Bcrypt hash of the password
    pub password_hash: String,

    /// Denormalized pointer to the currently active refresh token's id;
    /// set on refresh issuance, cleared on refresh revocation
    pub refresh_token_id: Option<Uuid>,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user; username and email are normalized to lowercase
    pub fn new(username: &str, email: &str, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_lowercase(),
            email: email.to_lowercase(),
            password_hash,
            refresh_token_id: None,
            created_at: Utc::now(),
        }
    }
}
