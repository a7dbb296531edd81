//! User repository trait defining the interface for user persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for `User` entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The saved user
    /// * `Err(DomainError)` - Insert failed (e.g. duplicate username/email)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Find a user by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by username (stored lowercase)
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by email (stored lowercase)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user owning the token with the given row id
    ///
    /// Used by the password-reset flow, where the mailed link carries the
    /// token id rather than the signed payload.
    async fn find_by_token_id(&self, token_id: Uuid) -> Result<Option<User>, DomainError>;

    /// Point a user at their active refresh token, or clear the pointer
    async fn set_refresh_token_id(
        &self,
        user_id: Uuid,
        token_id: Option<Uuid>,
    ) -> Result<(), DomainError>;

    /// Replace a user's password hash
    async fn update_password_hash(
        &self,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<(), DomainError>;

    /// Find a user by username or email, trying username first
    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, DomainError> {
        if let Some(user) = self.find_by_username(identifier).await? {
            return Ok(Some(user));
        }
        self.find_by_email(identifier).await
    }

    /// Whether a user with this username already exists
    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    /// Whether a user with this email already exists
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
