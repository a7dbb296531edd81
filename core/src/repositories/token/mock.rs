//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::{Token, TokenKind};
use crate::errors::{DomainError, TokenError};

use super::r#trait::TokenRepository;

/// In-memory token repository for testing
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, Token>>>,
    fail_next: Arc<RwLock<bool>>,
}

impl MockTokenRepository {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            fail_next: Arc::new(RwLock::new(false)),
        }
    }

    /// Make the next operation fail with a store error
    pub async fn fail_next_operation(&self) {
        *self.fail_next.write().await = true;
    }

    /// Snapshot of all stored rows, for assertions
    pub async fn all(&self) -> Vec<Token> {
        self.tokens.read().await.values().cloned().collect()
    }

    /// Number of stored rows
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Directly insert a row, bypassing the trait
    pub async fn seed(&self, token: Token) {
        self.tokens.write().await.insert(token.id, token);
    }

    async fn check_fail(&self) -> Result<(), DomainError> {
        let mut flag = self.fail_next.write().await;
        if *flag {
            *flag = false;
            return Err(TokenError::Store {
                message: "injected failure".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save(&self, token: Token) -> Result<Token, DomainError> {
        self.check_fail().await?;
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_active(
        &self,
        user_id: Uuid,
        kind: TokenKind,
    ) -> Result<Option<Token>, DomainError> {
        self.check_fail().await?;
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .filter(|t| t.user_id == user_id && t.kind == kind && t.is_active())
            .max_by_key(|t| t.created_at)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Token>, DomainError> {
        self.check_fail().await?;
        let tokens = self.tokens.read().await;
        Ok(tokens.get(&id).cloned())
    }

    async fn revoke_all(&self, user_id: Uuid, kind: TokenKind) -> Result<usize, DomainError> {
        self.check_fail().await?;
        let mut tokens = self.tokens.write().await;
        let now = Utc::now();
        let mut count = 0;

        for token in tokens.values_mut() {
            if token.user_id == user_id && token.kind == kind && !token.expired {
                token.expired = true;
                token.expires_at = now;
                count += 1;
            }
        }

        Ok(count)
    }

    async fn flag_past_expiry(&self) -> Result<usize, DomainError> {
        self.check_fail().await?;
        let mut tokens = self.tokens.write().await;
        let now = Utc::now();
        let mut count = 0;

        for token in tokens.values_mut() {
            if !token.expired && token.expires_at <= now {
                token.expired = true;
                count += 1;
            }
        }

        Ok(count)
    }

    async fn delete_flagged(&self) -> Result<usize, DomainError> {
        self.check_fail().await?;
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();

        tokens.retain(|_, token| !token.expired);

        Ok(before - tokens.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_revoke_all_flags_every_live_row() {
        let repo = MockTokenRepository::new();
        let user_id = Uuid::new_v4();
        repo.seed(Token::new(user_id, "a".into(), TokenKind::Access, 600))
            .await;
        repo.seed(Token::new(user_id, "b".into(), TokenKind::Access, 600))
            .await;
        repo.seed(Token::new(user_id, "r".into(), TokenKind::Refresh, 1200))
            .await;

        let revoked = repo.revoke_all(user_id, TokenKind::Access).await.unwrap();
        assert_eq!(revoked, 2);
        assert!(repo
            .find_active(user_id, TokenKind::Access)
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .find_active(user_id, TokenKind::Refresh)
            .await
            .unwrap()
            .is_some());

        // second pass finds nothing live
        let revoked = repo.revoke_all(user_id, TokenKind::Access).await.unwrap();
        assert_eq!(revoked, 0);
    }

    #[tokio::test]
    async fn test_flag_then_reclaim() {
        let repo = MockTokenRepository::new();
        let user_id = Uuid::new_v4();
        let mut due = Token::new(user_id, "old".into(), TokenKind::Access, 600);
        due.expires_at = Utc::now() - Duration::seconds(10);
        repo.seed(due).await;
        repo.seed(Token::new(user_id, "new".into(), TokenKind::Access, 600))
            .await;

        assert_eq!(repo.flag_past_expiry().await.unwrap(), 1);
        assert_eq!(repo.flag_past_expiry().await.unwrap(), 0);

        assert_eq!(repo.delete_flagged().await.unwrap(), 1);
        assert_eq!(repo.len().await, 1);
    }
}
