//! Audit service wrapping the audit log repository.

use std::sync::Arc;
use tracing::warn;

use crate::domain::entities::audit::AuditEntry;
use crate::repositories::{AuditLogRepository, NoOpAuditLogRepository};

/// Records audit entries without ever failing the caller
///
/// The audit trail is an observability aid, not part of any operation's
/// contract; a sink failure is logged and swallowed.
pub struct AuditService<A: AuditLogRepository = NoOpAuditLogRepository> {
    repository: Arc<A>,
}

impl<A: AuditLogRepository> AuditService<A> {
    pub fn new(repository: Arc<A>) -> Self {
        Self { repository }
    }

    /// Append an entry, logging and swallowing any sink failure
    pub async fn record(&self, entry: AuditEntry) {
        if let Err(e) = self.repository.append(&entry).await {
            warn!(
                action = entry.action.as_str(),
                outcome = entry.outcome.as_str(),
                "failed to record audit entry: {}",
                e
            );
        }
    }
}

impl Default for AuditService<NoOpAuditLogRepository> {
    fn default() -> Self {
        Self::new(Arc::new(NoOpAuditLogRepository::new()))
    }
}
