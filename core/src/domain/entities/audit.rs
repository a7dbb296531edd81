//! Audit trail entries for token lifecycle events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::token::TokenKind;

/// Lifecycle action being recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// A token was issued
    Create,
    /// A token (or all tokens of a kind) was revoked
    Revoke,
    /// The sweep flagged past-expiry rows
    Flag,
    /// The sweep deleted flagged rows
    Reclaim,
}

impl AuditAction {
    /// String representation stored in the audit log
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Revoke => "REVOKE",
            AuditAction::Flag => "FLAG",
            AuditAction::Reclaim => "RECLAIM",
        }
    }
}

/// Whether the recorded action succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditOutcome {
    Success,
    Error,
}

impl AuditOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditOutcome::Success => "SUCCESS",
            AuditOutcome::Error => "ERROR",
        }
    }
}

/// One audit log record
///
/// Sweep entries carry no kind or user; per-token entries carry both plus
/// the endpoint that triggered the operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Token kind involved, when the action targets a single kind
    pub kind: Option<TokenKind>,

    /// User whose tokens were affected
    pub user_id: Option<Uuid>,

    /// HTTP endpoint that triggered the action
    pub endpoint: Option<String>,

    /// What happened
    pub action: AuditAction,

    /// Whether it succeeded
    pub outcome: AuditOutcome,

    /// Free-form detail, e.g. an error message or a row count
    pub detail: Option<String>,

    /// Timestamp when the entry was recorded
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Entry for a per-token lifecycle action
    pub fn token(
        kind: TokenKind,
        user_id: Uuid,
        endpoint: &str,
        action: AuditAction,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            kind: Some(kind),
            user_id: Some(user_id),
            endpoint: Some(endpoint.to_string()),
            action,
            outcome,
            detail: None,
            created_at: Utc::now(),
        }
    }

    /// Entry for a background sweep pass
    pub fn sweep(action: AuditAction, outcome: AuditOutcome, detail: Option<String>) -> Self {
        Self {
            kind: None,
            user_id: None,
            endpoint: None,
            action,
            outcome,
            detail,
            created_at: Utc::now(),
        }
    }

    /// Attach a detail string
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
