pub mod render;

use async_trait::async_trait;

/// A rendered confirmation message, ready for a mail transport.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryResult {
    /// Handed to a real transport.
    Sent,
    /// Written to the log sink only.
    Logged,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("mail transport failed: {0}")]
    Transport(String),
}

/// Outbound mail capability. The real transport lives outside this
/// system; the shipped implementation is a log sink.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryResult, NotifyError>;
}

/// Identity used when rendering messages: who they come from and where
/// operator notices go.
#[derive(Debug, Clone)]
pub struct SenderProfile {
    pub site_name: String,
    pub noreply_email: String,
    pub operator_email: String,
}

/// Mailer that writes every message to the tracing log sink. Stands in
/// for a real mail/SMS sender during development.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryResult, NotifyError> {
        tracing::info!(
            to = %message.to,
            from = %message.from,
            subject = %message.subject,
            body = %message.body,
            "outbound email (log sink)"
        );
        Ok(DeliveryResult::Logged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_mailer_reports_logged_delivery() {
        let message = EmailMessage {
            to: "traveler@example.com".to_string(),
            from: "noreply@example.com".to_string(),
            subject: "Hello".to_string(),
            body: "Body".to_string(),
        };
        let result = LogMailer.send(&message).await.expect("log sink never fails");
        assert_eq!(result, DeliveryResult::Logged);
    }
}
