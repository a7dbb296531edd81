//! Token repository trait defining the interface for token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::{Token, TokenKind};
use crate::errors::DomainError;

/// Repository trait for `Token` entity persistence operations
///
/// The `tokens` table is the source of truth for every issued credential.
/// Implementations must treat the `expired` flag, not `expires_at`, as the
/// validity signal for lookups; the flag sweep and revocation set it.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a freshly issued token row
    ///
    /// # Returns
    /// * `Ok(Token)` - The saved token
    /// * `Err(DomainError)` - Insert failed
    async fn save(&self, token: Token) -> Result<Token, DomainError>;

    /// Find the most recent non-expired token for a (user, kind) pair
    ///
    /// Rows whose `expires_at` has passed but whose flag is still unset are
    /// returned; only the flag excludes a row.
    ///
    /// # Returns
    /// * `Ok(Some(Token))` - A live token exists
    /// * `Ok(None)` - No live token for this user and kind
    /// * `Err(DomainError)` - Query failed
    async fn find_active(
        &self,
        user_id: Uuid,
        kind: TokenKind,
    ) -> Result<Option<Token>, DomainError>;

    /// Find a token by its row id, regardless of expiry state
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Token>, DomainError>;

    /// Revoke every live token of one kind for a user
    ///
    /// Sets `expired = true` and stamps `expires_at` with the revocation
    /// time on all rows where the flag is still unset. Idempotent: a second
    /// call affects zero rows.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows revoked
    /// * `Err(DomainError)` - Update failed
    async fn revoke_all(&self, user_id: Uuid, kind: TokenKind) -> Result<usize, DomainError>;

    /// Flag every row whose `expires_at` has elapsed and whose flag is unset
    ///
    /// Called periodically by the cleanup scheduler.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows flagged
    async fn flag_past_expiry(&self) -> Result<usize, DomainError>;

    /// Delete every flagged row
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows deleted
    async fn delete_flagged(&self) -> Result<usize, DomainError>;
}
