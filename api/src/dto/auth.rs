//! Auth flow DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use libris_core::domain::entities::{Book, User};

/// Body for POST /register
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,

    #[validate(length(min = 3, max = 255))]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 128))]
    pub password_confirm: String,
}

/// Body for a created user, 201 from /register
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for RegisterResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Body for POST /auth; `identifier` is a username or an email
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 255))]
    pub identifier: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Body for a successful login
///
/// The refresh token travels separately, as an httpOnly cookie.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: u64,
    pub checkouts: Vec<Book>,
    pub waitlist: Vec<Book>,
}

/// Body for a successful refresh rotation
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub expires_in: u64,
}

/// Body for POST /forgot
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(length(min = 1, max = 255))]
    pub identifier: String,
}

/// Body confirming the reset mail went out
#[derive(Debug, Serialize)]
pub struct ForgotPasswordResponse {
    /// Obfuscated address the link was sent to
    pub email: String,
}

/// Query string for POST /reset-password
#[derive(Debug, Deserialize)]
pub struct ResetPasswordQuery {
    /// Reset token id from the mailed link
    pub reset: Uuid,
}

/// Body for POST /reset-password
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 128))]
    pub password_confirm: String,
}
