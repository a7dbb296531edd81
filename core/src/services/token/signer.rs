//! HS256 signing and verification with per-kind secrets.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenKind};
use crate::errors::{DomainError, TokenError};

use libris_shared::config::TokenSecretsConfig;

/// Signs and verifies token payloads
///
/// Each kind gets its own symmetric key, so verification is always against
/// the secret of the kind the caller expects; a refresh token presented
/// where an access token is expected fails on signature, not on claims.
pub struct JwtSigner {
    access: KeyPair,
    refresh: KeyPair,
    reset: KeyPair,
    validation: Validation,
}

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl JwtSigner {
    pub fn new(secrets: &TokenSecretsConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // no leeway: a payload is invalid the second its exp elapses
        validation.leeway = 0;

        Self {
            access: KeyPair::from_secret(&secrets.access_secret),
            refresh: KeyPair::from_secret(&secrets.refresh_secret),
            reset: KeyPair::from_secret(&secrets.reset_secret),
            validation,
        }
    }

    fn keys(&self, kind: TokenKind) -> &KeyPair {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
            TokenKind::Reset => &self.reset,
        }
    }

    /// Sign claims for a user, expiring `expires_in` seconds from now
    ///
    /// `token_id` becomes the `jti` claim, making the payload unique to
    /// its row even when issuance timestamps collide.
    pub fn sign(
        &self,
        user_id: Uuid,
        token_id: Uuid,
        kind: TokenKind,
        expires_in: u64,
    ) -> Result<String, DomainError> {
        let claims = Claims::new(user_id, token_id, expires_in);
        encode(&Header::default(), &claims, &self.keys(kind).encoding).map_err(|e| {
            DomainError::Internal {
                message: format!("failed to sign {} token: {}", kind, e),
            }
        })
    }

    /// Verify a payload against the secret for `kind`
    ///
    /// Fails with `TokenError::Invalid` on a bad signature, malformed
    /// payload, or elapsed expiry claim.
    pub fn verify(&self, payload: &str, kind: TokenKind) -> Result<Claims, DomainError> {
        decode::<Claims>(payload, &self.keys(kind).decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid.into())
    }
}
