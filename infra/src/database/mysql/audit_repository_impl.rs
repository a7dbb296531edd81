//! MySQL implementation of the AuditLogRepository trait.

use async_trait::async_trait;
use sqlx::MySqlPool;

use libris_core::domain::entities::AuditEntry;
use libris_core::errors::DomainError;
use libris_core::repositories::AuditLogRepository;

/// Append-only audit trail backed by the `audit_log` table
pub struct MySqlAuditLogRepository {
    pool: MySqlPool,
}

impl MySqlAuditLogRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for MySqlAuditLogRepository {
    async fn append(&self, entry: &AuditEntry) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO audit_log (kind, user_id, endpoint, action, outcome, detail, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(entry.kind.map(|k| k.as_str()))
            .bind(entry.user_id.map(|id| id.to_string()))
            .bind(entry.endpoint.as_deref())
            .bind(entry.action.as_str())
            .bind(entry.outcome.as_str())
            .bind(entry.detail.as_deref())
            .bind(entry.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("failed to append audit entry: {}", e)))?;

        Ok(())
    }
}
