//! Mock implementation of AuditLogRepository for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::audit::AuditEntry;
use crate::errors::DomainError;

use super::r#trait::AuditLogRepository;

/// In-memory audit log for testing
pub struct MockAuditLogRepository {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
    fail: Arc<RwLock<bool>>,
}

impl MockAuditLogRepository {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            fail: Arc::new(RwLock::new(false)),
        }
    }

    /// Make every append fail, to exercise the best-effort path
    pub async fn fail_appends(&self) {
        *self.fail.write().await = true;
    }

    /// Snapshot of all recorded entries
    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().await.clone()
    }
}

impl Default for MockAuditLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditLogRepository for MockAuditLogRepository {
    async fn append(&self, entry: &AuditEntry) -> Result<(), DomainError> {
        if *self.fail.read().await {
            return Err(DomainError::Internal {
                message: "audit sink unavailable".to_string(),
            });
        }
        self.entries.write().await.push(entry.clone());
        Ok(())
    }
}
