//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use libris_core::domain::entities::user::User;
use libris_core::errors::{AuthError, DomainError};
use libris_core::repositories::UserRepository;

const USER_COLUMNS: &str = "id, username, email, password_hash, refresh_token_id, created_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::store(format!("failed to get id: {}", e)))?;
        let refresh_token_id: Option<String> = row
            .try_get("refresh_token_id")
            .map_err(|e| DomainError::store(format!("failed to get refresh_token_id: {}", e)))?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::store(format!("invalid user UUID: {}", e)))?,
            username: row
                .try_get("username")
                .map_err(|e| DomainError::store(format!("failed to get username: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::store(format!("failed to get email: {}", e)))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::store(format!("failed to get password_hash: {}", e)))?,
            refresh_token_id: refresh_token_id
                .map(|id| {
                    Uuid::parse_str(&id)
                        .map_err(|e| DomainError::store(format!("invalid token UUID: {}", e)))
                })
                .transpose()?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::store(format!("failed to get created_at: {}", e)))?,
        })
    }

    async fn find_one(&self, query: &str, bind: &str) -> Result<Option<User>, DomainError> {
        let result = sqlx::query(query)
            .bind(bind)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("failed to find user: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, username, email, password_hash, refresh_token_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.refresh_token_id.map(|id| id.to_string()))
            .bind(user.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                // unique-index violation; the index name tells us which field
                Some(db) if db.code().as_deref() == Some("23000") => {
                    if db.message().contains("email") {
                        AuthError::EmailInUse.into()
                    } else {
                        AuthError::UserAlreadyExists.into()
                    }
                }
                _ => DomainError::store(format!("failed to create user: {}", e)),
            })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);
        self.find_one(&query, &id.to_string()).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE username = ? LIMIT 1",
            USER_COLUMNS
        );
        self.find_one(&query, &username.to_lowercase()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = ? LIMIT 1", USER_COLUMNS);
        self.find_one(&query, &email.to_lowercase()).await
    }

    async fn find_by_token_id(&self, token_id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT u.id, u.username, u.email, u.password_hash, u.refresh_token_id, u.created_at
            FROM users u
            INNER JOIN tokens t ON t.user_id = u.id
            WHERE t.id = ?
            LIMIT 1
        "#;
        self.find_one(query, &token_id.to_string()).await
    }

    async fn set_refresh_token_id(
        &self,
        user_id: Uuid,
        token_id: Option<Uuid>,
    ) -> Result<(), DomainError> {
        // MySQL reports changed rows, not matched rows, so a no-op update
        // (clearing an already-NULL pointer) affects zero rows; that is fine
        sqlx::query("UPDATE users SET refresh_token_id = ? WHERE id = ?")
            .bind(token_id.map(|id| id.to_string()))
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("failed to update refresh pointer: {}", e)))?;

        Ok(())
    }

    async fn update_password_hash(
        &self,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("failed to update password: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("user {}", user_id),
            });
        }
        Ok(())
    }
}
