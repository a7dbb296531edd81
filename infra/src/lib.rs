//! # Infrastructure Layer
//!
//! Concrete implementations of the `libris_core` contracts: MySQL
//! repositories via SQLx, the Redis token cache, the bcrypt password
//! hasher, and the outbound email service.

pub mod auth;
pub mod cache;
pub mod database;
pub mod email;

pub use auth::BcryptPasswordHasher;
pub use cache::RedisTokenCache;
pub use database::connection::DatabasePool;
pub use database::mysql::{
    MySqlAuditLogRepository, MySqlBookRepository, MySqlTokenRepository, MySqlUserRepository,
};
pub use email::LoggingEmailService;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfraError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfraError> for libris_core::DomainError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::Database(e) => libris_core::DomainError::store(e.to_string()),
            InfraError::Cache(e) => libris_core::DomainError::store(e.to_string()),
            InfraError::Config(message) => libris_core::DomainError::Internal { message },
        }
    }
}
