//! Outbound email contract for the password-reset flow.

use async_trait::async_trait;

use crate::errors::EmailError;

/// The messages this system sends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailMessage {
    /// Password-reset link mail; `link` carries the reset token id
    PasswordReset { link: String },
    /// Confirmation that the password was changed
    PasswordChanged,
}

impl EmailMessage {
    /// Subject line for this message
    pub fn subject(&self) -> &'static str {
        match self {
            EmailMessage::PasswordReset { .. } => "Reset your password",
            EmailMessage::PasswordChanged => "Your password was changed",
        }
    }
}

/// Sends transactional email
///
/// Failures are classified so the API layer can answer with distinct
/// statuses: `Temporary` and `Timeout` invite a retry, `Permanent` does not.
#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, to: &str, message: &EmailMessage) -> Result<(), EmailError>;
}

#[cfg(test)]
pub use mock::MockEmailService;

#[cfg(test)]
mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Email service that records sends instead of delivering
    pub struct MockEmailService {
        sent: Arc<RwLock<Vec<(String, EmailMessage)>>>,
        fail_with: Arc<RwLock<Option<EmailError>>>,
    }

    impl MockEmailService {
        pub fn new() -> Self {
            Self {
                sent: Arc::new(RwLock::new(Vec::new())),
                fail_with: Arc::new(RwLock::new(None)),
            }
        }

        /// Make every send fail with the given error
        pub async fn fail_with(&self, error: EmailError) {
            *self.fail_with.write().await = Some(error);
        }

        /// Snapshot of recorded sends
        pub async fn sent(&self) -> Vec<(String, EmailMessage)> {
            self.sent.read().await.clone()
        }
    }

    impl Default for MockEmailService {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl EmailService for MockEmailService {
        async fn send(&self, to: &str, message: &EmailMessage) -> Result<(), EmailError> {
            if let Some(error) = &*self.fail_with.read().await {
                return Err(match error {
                    EmailError::Temporary => EmailError::Temporary,
                    EmailError::Timeout => EmailError::Timeout,
                    EmailError::Permanent => EmailError::Permanent,
                });
            }
            self.sent
                .write()
                .await
                .push((to.to_string(), message.clone()));
            Ok(())
        }
    }
}
