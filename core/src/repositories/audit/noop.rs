//! No-op implementation of AuditLogRepository for when auditing is not needed

use async_trait::async_trait;

use crate::domain::entities::audit::AuditEntry;
use crate::errors::DomainError;

use super::AuditLogRepository;

/// Audit repository that discards every entry
pub struct NoOpAuditLogRepository;

impl NoOpAuditLogRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpAuditLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLogRepository for NoOpAuditLogRepository {
    async fn append(&self, _entry: &AuditEntry) -> Result<(), DomainError> {
        Ok(())
    }
}

// Also implement for () to allow simple type defaults
#[async_trait]
impl AuditLogRepository for () {
    async fn append(&self, _entry: &AuditEntry) -> Result<(), DomainError> {
        Ok(())
    }
}
