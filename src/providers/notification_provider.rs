use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::internal::NotificationError;

/// Outgoing email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivers notifications to people
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), NotificationError>;
}

/// Development mail sink that writes messages to the log
///
/// Stands in for a real mail transport; message bodies (which may carry
/// reset links) appear in the application log.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: EmailMessage) -> Result<(), NotificationError> {
        tracing::info!(
            from = %message.from,
            to = %message.to,
            subject = %message.subject,
            "Outgoing email:\n{}",
            message.body
        );
        Ok(())
    }
}

/// In-memory notifier that records every message, optionally failing instead
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<EmailMessage>>,
    failure: Option<String>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every dispatch fails with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        match self.sent.lock() {
            Ok(sent) => sent.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn send(&self, message: EmailMessage) -> Result<(), NotificationError> {
        if let Some(failure) = &self.failure {
            return Err(NotificationError::DispatchFailed {
                recipient: message.to,
                message: failure.clone(),
            });
        }

        match self.sent.lock() {
            Ok(mut sent) => sent.push(message),
            Err(poisoned) => poisoned.into_inner().push(message),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> EmailMessage {
        EmailMessage {
            from: "noreply@localhost".to_string(),
            to: "admin@acme.io".to_string(),
            subject: "Password Reset Request".to_string(),
            body: "link".to_string(),
        }
    }

    #[tokio::test]
    async fn test_memory_notifier_records_messages() {
        let notifier = MemoryNotifier::new();
        notifier.send(message()).await.unwrap();

        assert_eq!(notifier.sent(), vec![message()]);
    }

    #[tokio::test]
    async fn test_failing_notifier_reports_recipient() {
        let notifier = MemoryNotifier::failing("connection refused");
        let err = notifier.send(message()).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to send email: connection refused");
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_log_notifier_accepts_messages() {
        LogNotifier.send(message()).await.unwrap();
    }
}
