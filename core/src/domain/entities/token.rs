//! Token entities for the token lifecycle subsystem.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default access token lifetime (10 minutes)
pub const ACCESS_TOKEN_TTL_SECONDS: u64 = 600;

/// Default refresh token lifetime (20 minutes)
pub const REFRESH_TOKEN_TTL_SECONDS: u64 = 1200;

/// Default reset token lifetime (30 minutes)
pub const RESET_TOKEN_TTL_SECONDS: u64 = 1800;

/// The three supported token kinds
///
/// Exactly one non-expired token per (user, kind) exists at any time; the
/// lifecycle manager enforces this by revoking before issuing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// Short-lived API credential
    Access,
    /// Renews access tokens
    Refresh,
    /// Single-use password-reset handle
    Reset,
}

impl TokenKind {
    /// All supported kinds, in revocation-loop order
    pub const ALL: [TokenKind; 3] = [TokenKind::Access, TokenKind::Refresh, TokenKind::Reset];

    /// String representation used in the database and audit log
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "ACCESS",
            TokenKind::Refresh => "REFRESH",
            TokenKind::Reset => "RESET",
        }
    }

    /// Parse from the database string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACCESS" => Some(TokenKind::Access),
            "REFRESH" => Some(TokenKind::Refresh),
            "RESET" => Some(TokenKind::Reset),
            _ => None,
        }
    }

    /// Default lifetime in seconds for this kind
    pub fn default_ttl_seconds(&self) -> u64 {
        match self {
            TokenKind::Access => ACCESS_TOKEN_TTL_SECONDS,
            TokenKind::Refresh => REFRESH_TOKEN_TTL_SECONDS,
            TokenKind::Reset => RESET_TOKEN_TTL_SECONDS,
        }
    }

    /// Cache key for the active token of this kind for a user
    pub fn cache_key(&self, user_id: Uuid) -> String {
        let kind = match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
            TokenKind::Reset => "reset",
        };
        format!("{}token:{}", kind, user_id)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims structure for the signed payload
///
/// `jti` carries the token row id, so two tokens issued for the same user
/// within the same second still have distinct payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Token row id
    pub jti: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Create claims for a token expiring `expires_in` seconds from now
    pub fn new(user_id: Uuid, token_id: Uuid, expires_in: u64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            jti: token_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expires_in as i64)).timestamp(),
        }
    }

    /// Get the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Get the token row id from the claims
    pub fn token_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.jti)
    }

    /// Seconds until the expiry claim elapses (negative if already past)
    pub fn seconds_remaining(&self) -> i64 {
        self.exp - Utc::now().timestamp()
    }
}

/// Token row stored in the database
///
/// `expired` is the operative validity signal for lookups; a row whose
/// `expires_at` has passed is still returned by active-token lookups until
/// the flag sweep or a revocation marks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Unique identifier; doubles as the single-use reset-link handle
    pub id: Uuid,

    /// User this token belongs to
    pub user_id: Uuid,

    /// The signed credential string; opaque to the store
    pub payload: String,

    /// Token kind
    pub kind: TokenKind,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires; overwritten with the revocation
    /// time when a token is revoked early
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been flagged expired (revocation or sweep)
    pub expired: bool,
}

impl Token {
    /// Create a new token row expiring `expires_in` seconds from now
    pub fn new(user_id: Uuid, payload: String, kind: TokenKind, expires_in: u64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            payload,
            kind,
            created_at: now,
            expires_at: now + Duration::seconds(expires_in as i64),
            expired: false,
        }
    }

    /// Whether the expiry timestamp has elapsed (independent of the flag)
    pub fn is_past_expiry(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Whether lookups should treat this token as live
    pub fn is_active(&self) -> bool {
        !self.expired
    }
}

/// Result of issuing a single token
///
/// Carries both the row id and the signed payload so callers can use
/// whichever handle they need (the reset flow mails the id; everything
/// else hands out the payload).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Row id in the durable store
    pub id: Uuid,

    /// The signed credential string
    pub payload: String,

    /// Lifetime this token was issued with, in seconds
    pub expires_in: u64,
}

/// Access/refresh pair returned to the client after login or rotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Signed refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: u64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: u64,
}
