//! Audit log repository trait.

use async_trait::async_trait;

use crate::domain::entities::audit::AuditEntry;
use crate::errors::DomainError;

/// Repository trait for appending audit log records
///
/// Recording is best-effort: callers log append failures and never let them
/// block the primary operation.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Append one entry to the audit log
    async fn append(&self, entry: &AuditEntry) -> Result<(), DomainError>;
}
