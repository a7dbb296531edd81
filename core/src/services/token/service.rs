//! Token lifecycle manager.

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::audit::{AuditAction, AuditEntry, AuditOutcome};
use crate::domain::entities::token::{Claims, IssuedToken, Token, TokenKind, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{AuditLogRepository, NoOpAuditLogRepository, TokenRepository, UserRepository};
use crate::services::audit::AuditService;

use super::cache::TokenCache;
use super::config::TokenServiceConfig;
use super::signer::JwtSigner;

/// Per-call issuance options
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueOptions {
    /// Override the kind's default lifetime, in seconds
    pub expires_in: Option<u64>,
    /// Whether to write the payload through to the cache
    pub cache: bool,
}

impl IssueOptions {
    /// Default lifetime, written to the cache
    pub fn cached() -> Self {
        Self {
            expires_in: None,
            cache: true,
        }
    }

    /// Default lifetime, store only
    pub fn uncached() -> Self {
        Self {
            expires_in: None,
            cache: false,
        }
    }

    /// Explicit lifetime, written to the cache
    pub fn cached_for(seconds: u64) -> Self {
        Self {
            expires_in: Some(seconds),
            cache: true,
        }
    }
}

/// Coordinates token issuance, retrieval, rotation and revocation across
/// the token store (source of truth) and the cache (fast path)
///
/// The single-live-token-per-(user, kind) invariant is enforced by
/// sequencing: every flow revokes before it issues. There is no in-process
/// locking; two concurrent logins for one user race on the refresh pointer
/// and the loser's tokens are dead on arrival.
pub struct TokenService<R, U, C, A = NoOpAuditLogRepository>
where
    R: TokenRepository,
    U: UserRepository,
    C: TokenCache,
    A: AuditLogRepository,
{
    repository: Arc<R>,
    users: Arc<U>,
    cache: Arc<C>,
    audit: Arc<AuditService<A>>,
    signer: JwtSigner,
    config: TokenServiceConfig,
}

impl<R, U, C, A> TokenService<R, U, C, A>
where
    R: TokenRepository,
    U: UserRepository,
    C: TokenCache,
    A: AuditLogRepository,
{
    pub fn new(
        repository: Arc<R>,
        users: Arc<U>,
        cache: Arc<C>,
        audit: Arc<AuditService<A>>,
        config: TokenServiceConfig,
    ) -> Self {
        let signer = JwtSigner::new(&config.secrets);
        Self {
            repository,
            users,
            cache,
            audit,
            signer,
            config,
        }
    }

    /// Issue a fresh token of `kind` for a user
    ///
    /// Signs the payload, inserts the row, updates the refresh pointer for
    /// refresh tokens, and optionally writes through to the cache. A cache
    /// write failure after a successful insert is logged, not fatal.
    pub async fn issue(
        &self,
        kind: TokenKind,
        user_id: Uuid,
        endpoint: &str,
        opts: IssueOptions,
    ) -> Result<IssuedToken, DomainError> {
        let expires_in = opts.expires_in.unwrap_or_else(|| kind.default_ttl_seconds());

        match self.issue_inner(kind, user_id, expires_in, opts.cache).await {
            Ok(issued) => {
                self.audit
                    .record(AuditEntry::token(
                        kind,
                        user_id,
                        endpoint,
                        AuditAction::Create,
                        AuditOutcome::Success,
                    ))
                    .await;
                Ok(issued)
            }
            Err(e) => {
                self.audit
                    .record(
                        AuditEntry::token(
                            kind,
                            user_id,
                            endpoint,
                            AuditAction::Create,
                            AuditOutcome::Error,
                        )
                        .with_detail(e.to_string()),
                    )
                    .await;
                Err(e)
            }
        }
    }

    async fn issue_inner(
        &self,
        kind: TokenKind,
        user_id: Uuid,
        expires_in: u64,
        cache: bool,
    ) -> Result<IssuedToken, DomainError> {
        // the row id goes into the jti claim, so it is fixed before signing
        let token_id = Uuid::new_v4();
        let payload = self.signer.sign(user_id, token_id, kind, expires_in)?;
        let mut token = Token::new(user_id, payload, kind, expires_in);
        token.id = token_id;
        let saved = self.repository.save(token).await?;

        if kind == TokenKind::Refresh {
            self.users
                .set_refresh_token_id(user_id, Some(saved.id))
                .await?;
        }

        if cache {
            let key = kind.cache_key(user_id);
            if let Err(e) = self.cache.set(&key, &saved.payload, expires_in).await {
                warn!(
                    kind = kind.as_str(),
                    %user_id,
                    "cache write failed after issuing token: {}",
                    e
                );
            }
        }

        debug!(kind = kind.as_str(), %user_id, expires_in, "issued token");

        Ok(IssuedToken {
            id: saved.id,
            payload: saved.payload,
            expires_in,
        })
    }

    /// Fetch the live payload for a (kind, user) pair
    ///
    /// Cache first; a cache hit never touches the store. Cache-layer errors
    /// are treated as a miss and the store answers.
    pub async fn retrieve(
        &self,
        kind: TokenKind,
        user_id: Uuid,
    ) -> Result<Option<String>, DomainError> {
        let key = kind.cache_key(user_id);
        match self.cache.get(&key).await {
            Ok(Some(payload)) => return Ok(Some(payload)),
            Ok(None) => {}
            Err(e) => {
                warn!(kind = kind.as_str(), %user_id, "cache read failed, falling back to store: {}", e);
            }
        }

        let token = self.repository.find_active(user_id, kind).await?;
        Ok(token.map(|t| t.payload))
    }

    /// Revoke every live token of the given kinds for a user
    ///
    /// Kinds are processed in order; the first failure is audited and aborts
    /// the loop without rolling back kinds already revoked. An empty slice
    /// is a no-op.
    pub async fn revoke(
        &self,
        kinds: &[TokenKind],
        user_id: Uuid,
        endpoint: &str,
    ) -> Result<(), DomainError> {
        if kinds.is_empty() {
            return Ok(());
        }
        if kinds.len() > TokenKind::ALL.len() {
            return Err(TokenError::InvalidArgument {
                message: format!("cannot revoke {} token kinds at once", kinds.len()),
            }
            .into());
        }

        for &kind in kinds {
            if let Err(e) = self.revoke_one(kind, user_id).await {
                self.audit
                    .record(
                        AuditEntry::token(
                            kind,
                            user_id,
                            endpoint,
                            AuditAction::Revoke,
                            AuditOutcome::Error,
                        )
                        .with_detail(e.to_string()),
                    )
                    .await;
                return Err(TokenError::Revocation {
                    message: format!("revoking {} tokens failed: {}", kind, e),
                }
                .into());
            }
            self.audit
                .record(AuditEntry::token(
                    kind,
                    user_id,
                    endpoint,
                    AuditAction::Revoke,
                    AuditOutcome::Success,
                ))
                .await;
        }

        Ok(())
    }

    async fn revoke_one(&self, kind: TokenKind, user_id: Uuid) -> Result<(), DomainError> {
        if kind == TokenKind::Refresh {
            self.users.set_refresh_token_id(user_id, None).await?;
        }

        let revoked = self.repository.revoke_all(user_id, kind).await?;
        self.cache.delete(&kind.cache_key(user_id)).await?;

        debug!(kind = kind.as_str(), %user_id, revoked, "revoked tokens");
        Ok(())
    }

    /// Login rotation: drop the old pair, issue a fresh one
    ///
    /// The access token is store-only; the refresh token gets the login
    /// lifetime and is cached.
    pub async fn login_rotation(
        &self,
        user_id: Uuid,
        endpoint: &str,
    ) -> Result<TokenPair, DomainError> {
        self.revoke(&[TokenKind::Access, TokenKind::Refresh], user_id, endpoint)
            .await?;

        let access = self
            .issue(TokenKind::Access, user_id, endpoint, IssueOptions::uncached())
            .await?;
        let refresh = self
            .issue(
                TokenKind::Refresh,
                user_id,
                endpoint,
                IssueOptions::cached_for(self.config.login_refresh_ttl_seconds),
            )
            .await?;

        info!(%user_id, "issued login token pair");

        Ok(TokenPair {
            access_token: access.payload,
            refresh_token: refresh.payload,
            access_expires_in: access.expires_in,
            refresh_expires_in: refresh.expires_in,
        })
    }

    /// Refresh rotation: exchange a live refresh token for a fresh pair
    ///
    /// The presented payload must verify against the refresh secret and be
    /// byte-identical to the stored live token. The old pair is revoked
    /// before the rotation floor is applied, so a below-floor exchange is
    /// refused with nothing left live; the client has to log in again. The
    /// replacement refresh token keeps the remaining lifetime of the one it
    /// replaces.
    pub async fn rotate_refresh(
        &self,
        presented: &str,
        endpoint: &str,
    ) -> Result<TokenPair, DomainError> {
        let claims = self.signer.verify(presented, TokenKind::Refresh)?;
        let user_id = claims.user_id().map_err(|_| TokenError::Invalid)?;

        let stored = self.retrieve(TokenKind::Refresh, user_id).await?;
        if stored.as_deref() != Some(presented) {
            return Err(TokenError::Invalid.into());
        }

        let time_remaining = claims.seconds_remaining();
        self.revoke(&[TokenKind::Access, TokenKind::Refresh], user_id, endpoint)
            .await?;

        if time_remaining < self.config.rotation_floor_seconds {
            debug!(%user_id, time_remaining, "refresh token below rotation floor");
            return Err(TokenError::Forbidden.into());
        }

        let access = self
            .issue(TokenKind::Access, user_id, endpoint, IssueOptions::cached())
            .await?;
        let refresh = self
            .issue(
                TokenKind::Refresh,
                user_id,
                endpoint,
                IssueOptions::cached_for(time_remaining as u64),
            )
            .await?;

        Ok(TokenPair {
            access_token: access.payload,
            refresh_token: refresh.payload,
            access_expires_in: access.expires_in,
            refresh_expires_in: refresh.expires_in,
        })
    }

    /// Logout: revoke the pair named by a refresh payload
    ///
    /// An unverifiable payload means there is nothing trustworthy to revoke;
    /// the caller clears its cookie either way, so this is not an error.
    pub async fn logout(&self, presented: &str, endpoint: &str) -> Result<(), DomainError> {
        match self.signer.verify(presented, TokenKind::Refresh) {
            Ok(claims) => {
                let user_id = claims.user_id().map_err(|_| TokenError::Invalid)?;
                self.revoke(&[TokenKind::Access, TokenKind::Refresh], user_id, endpoint)
                    .await
            }
            Err(_) => {
                debug!("logout with unverifiable refresh token");
                Ok(())
            }
        }
    }

    /// Verify an access payload and extract its subject
    pub fn verify_access(&self, payload: &str) -> Result<Uuid, DomainError> {
        let claims = self.signer.verify(payload, TokenKind::Access)?;
        claims.user_id().map_err(|_| TokenError::Invalid.into())
    }

    /// Verify a payload against the secret for `kind`
    pub fn verify(&self, payload: &str, kind: TokenKind) -> Result<Claims, DomainError> {
        self.signer.verify(payload, kind)
    }
}
