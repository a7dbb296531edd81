//! MySQL implementation of the TokenRepository trait.
//!
//! The `tokens` table is the source of truth for issued credentials. The
//! `expired` flag is the operative validity signal: lookups filter on it,
//! and the sweep jobs maintain it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use libris_core::domain::entities::token::{Token, TokenKind};
use libris_core::errors::DomainError;
use libris_core::repositories::TokenRepository;

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<Token, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::store(format!("failed to get id: {}", e)))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| DomainError::store(format!("failed to get user_id: {}", e)))?;
        let kind: String = row
            .try_get("kind")
            .map_err(|e| DomainError::store(format!("failed to get kind: {}", e)))?;

        Ok(Token {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::store(format!("invalid token UUID: {}", e)))?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::store(format!("invalid user UUID: {}", e)))?,
            payload: row
                .try_get("payload")
                .map_err(|e| DomainError::store(format!("failed to get payload: {}", e)))?,
            kind: TokenKind::parse(&kind)
                .ok_or_else(|| DomainError::store(format!("unknown token kind: {}", kind)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::store(format!("failed to get created_at: {}", e)))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::store(format!("failed to get expires_at: {}", e)))?,
            expired: row
                .try_get("expired")
                .map_err(|e| DomainError::store(format!("failed to get expired: {}", e)))?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save(&self, token: Token) -> Result<Token, DomainError> {
        let query = r#"
            INSERT INTO tokens (id, user_id, payload, kind, created_at, expires_at, expired)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(token.user_id.to_string())
            .bind(&token.payload)
            .bind(token.kind.as_str())
            .bind(token.created_at)
            .bind(token.expires_at)
            .bind(token.expired)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("failed to save token: {}", e)))?;

        Ok(token)
    }

    async fn find_active(
        &self,
        user_id: Uuid,
        kind: TokenKind,
    ) -> Result<Option<Token>, DomainError> {
        let query = r#"
            SELECT id, user_id, payload, kind, created_at, expires_at, expired
            FROM tokens
            WHERE user_id = ? AND kind = ? AND expired = FALSE
            ORDER BY created_at DESC
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(user_id.to_string())
            .bind(kind.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("failed to find active token: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Token>, DomainError> {
        let query = r#"
            SELECT id, user_id, payload, kind, created_at, expires_at, expired
            FROM tokens
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("failed to find token by id: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn revoke_all(&self, user_id: Uuid, kind: TokenKind) -> Result<usize, DomainError> {
        // stamps the revocation time into expires_at so the row reads as
        // ended now, not at its originally scheduled expiry
        let query = r#"
            UPDATE tokens
            SET expired = TRUE, expires_at = ?
            WHERE user_id = ? AND kind = ? AND expired = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(user_id.to_string())
            .bind(kind.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("failed to revoke tokens: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }

    async fn flag_past_expiry(&self) -> Result<usize, DomainError> {
        let query = r#"
            UPDATE tokens
            SET expired = TRUE
            WHERE expired = FALSE AND expires_at <= ?
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("failed to flag expired tokens: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_flagged(&self) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM tokens WHERE expired = TRUE")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("failed to delete flagged tokens: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }
}
