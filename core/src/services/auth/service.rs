//! Authentication service implementation.

use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::entities::token::{TokenKind, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{AuditLogRepository, NoOpAuditLogRepository, TokenRepository, UserRepository};
use crate::services::email::{EmailMessage, EmailService};
use crate::services::token::{IssueOptions, TokenCache, TokenService};

use libris_shared::utils::validation;

use super::config::AuthConfig;
use super::password::PasswordHasher;

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub tokens: TokenPair,
}

/// Drives registration, login, token rotation and the password-reset
/// protocol on top of the token lifecycle manager
pub struct AuthService<R, U, C, E, P, A = NoOpAuditLogRepository>
where
    R: TokenRepository,
    U: UserRepository,
    C: TokenCache,
    E: EmailService,
    P: PasswordHasher,
    A: AuditLogRepository,
{
    tokens: Arc<TokenService<R, U, C, A>>,
    users: Arc<U>,
    email: Arc<E>,
    hasher: Arc<P>,
    config: AuthConfig,
}

impl<R, U, C, E, P, A> AuthService<R, U, C, E, P, A>
where
    R: TokenRepository,
    U: UserRepository,
    C: TokenCache,
    E: EmailService,
    P: PasswordHasher,
    A: AuditLogRepository,
{
    pub fn new(
        tokens: Arc<TokenService<R, U, C, A>>,
        users: Arc<U>,
        email: Arc<E>,
        hasher: Arc<P>,
        config: AuthConfig,
    ) -> Self {
        Self {
            tokens,
            users,
            email,
            hasher,
            config,
        }
    }

    /// Register a new user
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<User, DomainError> {
        if !validation::is_valid_username(username) {
            return Err(AuthError::ValidationFailed {
                message: "invalid username".to_string(),
            }
            .into());
        }
        if !validation::is_valid_email(email) {
            return Err(AuthError::ValidationFailed {
                message: "invalid email".to_string(),
            }
            .into());
        }
        if !validation::is_valid_password(password) {
            return Err(AuthError::ValidationFailed {
                message: "password does not meet the policy".to_string(),
            }
            .into());
        }
        if password != password_confirm {
            return Err(AuthError::PasswordMismatch.into());
        }

        if self.users.exists_by_username(username).await? {
            return Err(AuthError::UserAlreadyExists.into());
        }
        if self.users.exists_by_email(email).await? {
            return Err(AuthError::EmailInUse.into());
        }

        let password_hash = self.hasher.hash(password)?;
        let user = self.users.create(User::new(username, email, password_hash)).await?;
        info!(user_id = %user.id, "registered user");
        Ok(user)
    }

    /// Log a user in, rotating their token pair
    pub async fn login(
        &self,
        identifier: &str,
        password: &str,
        endpoint: &str,
    ) -> Result<LoginOutcome, DomainError> {
        let user = self
            .users
            .find_by_username_or_email(identifier)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AuthError::WrongPassword.into());
        }

        let tokens = self.tokens.login_rotation(user.id, endpoint).await?;
        info!(user_id = %user.id, "login");
        Ok(LoginOutcome { user, tokens })
    }

    /// Exchange a refresh payload for a fresh pair
    pub async fn refresh(&self, payload: &str, endpoint: &str) -> Result<TokenPair, DomainError> {
        self.tokens.rotate_refresh(payload, endpoint).await
    }

    /// Log out: revoke the pair named by the refresh cookie
    pub async fn logout(&self, payload: &str, endpoint: &str) -> Result<(), DomainError> {
        self.tokens.logout(payload, endpoint).await
    }

    /// Start the password-reset protocol
    ///
    /// Issues a fresh reset token (revoking any earlier one), mails a link
    /// carrying the token id, and returns the obfuscated address for the
    /// response body.
    pub async fn forgot_password(
        &self,
        identifier: &str,
        endpoint: &str,
    ) -> Result<String, DomainError> {
        let user = self
            .users
            .find_by_username_or_email(identifier)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.tokens
            .revoke(&[TokenKind::Reset], user.id, endpoint)
            .await?;
        let issued = self
            .tokens
            .issue(TokenKind::Reset, user.id, endpoint, IssueOptions::uncached())
            .await?;

        let link = self.config.reset_link(issued.id);
        self.email
            .send(&user.email, &EmailMessage::PasswordReset { link })
            .await?;

        info!(user_id = %user.id, "sent password-reset link");
        Ok(validation::obfuscate_email(&user.email))
    }

    /// Complete the password-reset protocol
    ///
    /// The reset token is single-use on both paths: a payload that fails
    /// verification is revoked before the rejection is returned, and a
    /// successful reset revokes it before the new password is stored.
    pub async fn reset_password(
        &self,
        token_id: Uuid,
        password: &str,
        password_confirm: &str,
        endpoint: &str,
    ) -> Result<(), DomainError> {
        if !validation::is_valid_password(password) {
            return Err(AuthError::ValidationFailed {
                message: "password does not meet the policy".to_string(),
            }
            .into());
        }
        if password != password_confirm {
            return Err(AuthError::PasswordMismatch.into());
        }

        let user = self
            .users
            .find_by_token_id(token_id)
            .await?
            .ok_or(TokenError::Invalid)?;

        let verified = match self.tokens.retrieve(TokenKind::Reset, user.id).await? {
            Some(stored) => self.tokens.verify(&stored, TokenKind::Reset).is_ok(),
            None => false,
        };
        if !verified {
            debug!(user_id = %user.id, "rejecting reset with unverifiable token");
            self.tokens
                .revoke(&[TokenKind::Reset], user.id, endpoint)
                .await?;
            return Err(TokenError::Invalid.into());
        }

        self.email
            .send(&user.email, &EmailMessage::PasswordChanged)
            .await?;
        self.tokens
            .revoke(&[TokenKind::Reset], user.id, endpoint)
            .await?;

        let password_hash = self.hasher.hash(password)?;
        self.users
            .update_password_hash(user.id, &password_hash)
            .await?;

        info!(user_id = %user.id, "password reset completed");
        Ok(())
    }

    /// Verify an access payload and extract its subject
    pub fn verify_access(&self, payload: &str) -> Result<Uuid, DomainError> {
        self.tokens.verify_access(payload)
    }
}
