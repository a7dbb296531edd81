//! Outbound email delivery.

use async_trait::async_trait;
use tracing::info;

use libris_core::errors::EmailError;
use libris_core::services::{EmailMessage, EmailService};

/// Email service that writes sends to the log instead of delivering
///
/// Stands in for a real SMTP or provider integration in development and
/// staging. The reset link lands in the server log, which is enough to
/// exercise the full forgot/reset flow end to end.
pub struct LoggingEmailService;

impl LoggingEmailService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailService for LoggingEmailService {
    async fn send(&self, to: &str, message: &EmailMessage) -> Result<(), EmailError> {
        match message {
            EmailMessage::PasswordReset { link } => {
                info!(to = %to, subject = message.subject(), link = %link, "sending email");
            }
            EmailMessage::PasswordChanged => {
                info!(to = %to, subject = message.subject(), "sending email");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_always_succeeds() {
        let service = LoggingEmailService::new();
        let message = EmailMessage::PasswordReset {
            link: "http://localhost:3000/reset-password?reset=abc".to_string(),
        };
        assert!(service.send("reader@example.com", &message).await.is_ok());
        assert!(service
            .send("reader@example.com", &EmailMessage::PasswordChanged)
            .await
            .is_ok());
    }
}
