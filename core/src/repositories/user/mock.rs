//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::r#trait::UserRepository;

/// In-memory user repository for testing
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    /// token id -> owning user id, standing in for the tokens-table join
    token_links: Arc<RwLock<HashMap<Uuid, Uuid>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            token_links: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Directly insert a user, bypassing the trait
    pub async fn seed(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Record which user owns a token id, so `find_by_token_id` resolves
    pub async fn link_token(&self, token_id: Uuid, user_id: Uuid) {
        self.token_links.write().await.insert(token_id, user_id);
    }

    /// Fetch the stored copy of a user, for assertions
    pub async fn get(&self, id: Uuid) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == user.username) {
            return Err(AuthError::UserAlreadyExists.into());
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailInUse.into());
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let needle = username.to_lowercase();
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == needle).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let needle = email.to_lowercase();
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == needle).cloned())
    }

    async fn find_by_token_id(&self, token_id: Uuid) -> Result<Option<User>, DomainError> {
        let links = self.token_links.read().await;
        let Some(user_id) = links.get(&token_id) else {
            return Ok(None);
        };
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn set_refresh_token_id(
        &self,
        user_id: Uuid,
        token_id: Option<Uuid>,
    ) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&user_id) {
            Some(user) => {
                user.refresh_token_id = token_id;
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: format!("user {}", user_id),
            }),
        }
    }

    async fn update_password_hash(
        &self,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&user_id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: format!("user {}", user_id),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_rejects_duplicates() {
        let repo = MockUserRepository::new();
        let user = User::new("reader", "reader@example.com", "hash".into());
        repo.create(user.clone()).await.unwrap();

        let dup = User::new("reader", "other@example.com", "hash".into());
        assert!(matches!(
            repo.create(dup).await,
            Err(DomainError::Auth(AuthError::UserAlreadyExists))
        ));

        let dup = User::new("other", "reader@example.com", "hash".into());
        assert!(matches!(
            repo.create(dup).await,
            Err(DomainError::Auth(AuthError::EmailInUse))
        ));
    }

    #[tokio::test]
    async fn test_find_by_username_or_email() {
        let repo = MockUserRepository::new();
        let user = User::new("reader", "reader@example.com", "hash".into());
        repo.seed(user.clone()).await;

        let by_name = repo.find_by_username_or_email("Reader").await.unwrap();
        assert_eq!(by_name.as_ref().map(|u| u.id), Some(user.id));

        let by_email = repo
            .find_by_username_or_email("reader@example.com")
            .await
            .unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_find_by_token_id_resolves_link() {
        let repo = MockUserRepository::new();
        let user = User::new("reader", "reader@example.com", "hash".into());
        repo.seed(user.clone()).await;

        let token_id = Uuid::new_v4();
        repo.link_token(token_id, user.id).await;

        let found = repo.find_by_token_id(token_id).await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
        assert!(repo.find_by_token_id(Uuid::new_v4()).await.unwrap().is_none());
    }
}
