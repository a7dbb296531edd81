//! Background expiry sweeps over the token store.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::entities::audit::{AuditAction, AuditEntry, AuditOutcome};
use crate::errors::DomainError;
use crate::repositories::{AuditLogRepository, NoOpAuditLogRepository, TokenRepository};
use crate::services::audit::AuditService;

/// Configuration for the expiry reclamation scheduler
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to flag past-expiry rows, in seconds
    pub flag_interval_seconds: u64,
    /// How often to delete flagged rows, in seconds
    pub reclaim_interval_seconds: u64,
    /// Whether the background tasks run at all
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            flag_interval_seconds: 300,
            reclaim_interval_seconds: 3600,
            enabled: true,
        }
    }
}

/// Two-phase reclamation of expired token rows
///
/// The flag pass marks rows whose `expires_at` has elapsed; the reclaim
/// pass deletes marked rows. Splitting the phases keeps recently expired
/// rows queryable (the reset flow resolves users through token ids) until
/// the slower reclaim pass runs. Neither pass touches the cache: cache
/// entries carry their own TTL.
pub struct TokenCleanupService<R, A = NoOpAuditLogRepository>
where
    R: TokenRepository + 'static,
    A: AuditLogRepository + 'static,
{
    repository: Arc<R>,
    audit: Arc<AuditService<A>>,
    config: TokenCleanupConfig,
}

impl<R, A> TokenCleanupService<R, A>
where
    R: TokenRepository + 'static,
    A: AuditLogRepository + 'static,
{
    pub fn new(
        repository: Arc<R>,
        audit: Arc<AuditService<A>>,
        config: TokenCleanupConfig,
    ) -> Self {
        Self {
            repository,
            audit,
            config,
        }
    }

    /// Run a single flag pass
    ///
    /// Idempotent: a second pass with no newly due rows affects nothing.
    pub async fn run_flag_pass(&self) -> Result<usize, DomainError> {
        match self.repository.flag_past_expiry().await {
            Ok(count) => {
                if count > 0 {
                    info!(count, "flagged past-expiry tokens");
                }
                self.audit
                    .record(AuditEntry::sweep(
                        AuditAction::Flag,
                        AuditOutcome::Success,
                        Some(format!("flagged {} rows", count)),
                    ))
                    .await;
                Ok(count)
            }
            Err(e) => {
                error!("flag pass failed: {}", e);
                self.audit
                    .record(AuditEntry::sweep(
                        AuditAction::Flag,
                        AuditOutcome::Error,
                        Some(e.to_string()),
                    ))
                    .await;
                Err(e)
            }
        }
    }

    /// Run a single reclaim pass, deleting every flagged row
    pub async fn run_reclaim_pass(&self) -> Result<usize, DomainError> {
        match self.repository.delete_flagged().await {
            Ok(count) => {
                if count > 0 {
                    info!(count, "reclaimed flagged tokens");
                }
                self.audit
                    .record(AuditEntry::sweep(
                        AuditAction::Reclaim,
                        AuditOutcome::Success,
                        Some(format!("deleted {} rows", count)),
                    ))
                    .await;
                Ok(count)
            }
            Err(e) => {
                error!("reclaim pass failed: {}", e);
                self.audit
                    .record(AuditEntry::sweep(
                        AuditAction::Reclaim,
                        AuditOutcome::Error,
                        Some(e.to_string()),
                    ))
                    .await;
                Err(e)
            }
        }
    }

    /// Spawn the flag and reclaim loops as independent background tasks
    ///
    /// A failed cycle is logged and the loop keeps ticking.
    pub fn start_background_tasks(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("token cleanup is disabled");
            return;
        }

        let flag_service = Arc::clone(&self);
        let flag_interval = std::time::Duration::from_secs(self.config.flag_interval_seconds);
        tokio::spawn(async move {
            info!(
                interval_seconds = flag_service.config.flag_interval_seconds,
                "token flag sweep started"
            );
            let mut ticker = tokio::time::interval(flag_interval);
            loop {
                ticker.tick().await;
                if let Err(e) = flag_service.run_flag_pass().await {
                    warn!("flag cycle failed, will retry next tick: {}", e);
                }
            }
        });

        let reclaim_interval = std::time::Duration::from_secs(self.config.reclaim_interval_seconds);
        tokio::spawn(async move {
            info!(
                interval_seconds = self.config.reclaim_interval_seconds,
                "token reclaim sweep started"
            );
            let mut ticker = tokio::time::interval(reclaim_interval);
            loop {
                ticker.tick().await;
                if let Err(e) = self.run_reclaim_pass().await {
                    warn!("reclaim cycle failed, will retry next tick: {}", e);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::token::{Token, TokenKind};
    use crate::repositories::{MockAuditLogRepository, MockTokenRepository};
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn service(
        repo: Arc<MockTokenRepository>,
        audit_repo: Arc<MockAuditLogRepository>,
    ) -> TokenCleanupService<MockTokenRepository, MockAuditLogRepository> {
        TokenCleanupService::new(
            repo,
            Arc::new(AuditService::new(audit_repo)),
            TokenCleanupConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_flag_pass_marks_only_due_rows() {
        let repo = Arc::new(MockTokenRepository::new());
        let audit_repo = Arc::new(MockAuditLogRepository::new());
        let user_id = Uuid::new_v4();

        let mut due = Token::new(user_id, "old".into(), TokenKind::Access, 600);
        due.expires_at = Utc::now() - Duration::seconds(1);
        repo.seed(due).await;
        repo.seed(Token::new(user_id, "live".into(), TokenKind::Refresh, 1200))
            .await;

        let service = service(repo.clone(), audit_repo.clone());

        assert_eq!(service.run_flag_pass().await.unwrap(), 1);
        // idempotent: nothing newly due
        assert_eq!(service.run_flag_pass().await.unwrap(), 0);

        let live: Vec<_> = repo.all().await.into_iter().filter(|t| !t.expired).collect();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].payload, "live");
    }

    #[tokio::test]
    async fn test_reclaim_pass_deletes_only_flagged_rows() {
        let repo = Arc::new(MockTokenRepository::new());
        let audit_repo = Arc::new(MockAuditLogRepository::new());
        let user_id = Uuid::new_v4();

        let mut flagged = Token::new(user_id, "dead".into(), TokenKind::Access, 600);
        flagged.expired = true;
        repo.seed(flagged).await;

        // past expiry but not yet flagged: reclaim must not touch it
        let mut unflagged = Token::new(user_id, "due".into(), TokenKind::Access, 600);
        unflagged.expires_at = Utc::now() - Duration::seconds(1);
        repo.seed(unflagged).await;

        let service = service(repo.clone(), audit_repo.clone());

        assert_eq!(service.run_reclaim_pass().await.unwrap(), 1);
        let remaining = repo.all().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].payload, "due");
    }

    #[tokio::test]
    async fn test_passes_record_sweep_audit_entries() {
        let repo = Arc::new(MockTokenRepository::new());
        let audit_repo = Arc::new(MockAuditLogRepository::new());
        let service = service(repo.clone(), audit_repo.clone());

        service.run_flag_pass().await.unwrap();
        service.run_reclaim_pass().await.unwrap();

        let entries = audit_repo.entries().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, AuditAction::Flag);
        assert_eq!(entries[1].action, AuditAction::Reclaim);
        assert!(entries.iter().all(|e| e.user_id.is_none()));
    }

    #[tokio::test]
    async fn test_failed_pass_surfaces_error_and_audits() {
        let repo = Arc::new(MockTokenRepository::new());
        let audit_repo = Arc::new(MockAuditLogRepository::new());
        let service = service(repo.clone(), audit_repo.clone());

        repo.fail_next_operation().await;
        assert!(service.run_flag_pass().await.is_err());

        let entries = audit_repo.entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].outcome, AuditOutcome::Error);
    }
}
