//! Mailer trait, message type and error types.

use async_trait::async_trait;

/// Errors that can occur while building or delivering a message.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid mail address '{0}'")]
    Address(String),
    #[error("Failed to build message: {0}")]
    Message(String),
    #[error("Mail transport error: {0}")]
    Transport(String),
}

/// Result type for mail operations.
pub type MailResult<T> = Result<T, MailError>;

/// A plain-text message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Trait for delivering outgoing email.
///
/// Delivery is a single attempt: implementations do not retry, and a failure
/// is reported to the caller.
///
/// # Implementations
///
/// - [`crate::infrastructure::mail::SmtpMailer`] - SMTP relay
/// - [`crate::infrastructure::mail::ConsoleMailer`] - Log output for development
/// - [`crate::infrastructure::mail::MemoryMailer`] - In-memory outbox for tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Address`] if a sender or recipient address is malformed,
    /// [`MailError::Transport`] if the message could not be delivered.
    async fn send(&self, email: OutgoingEmail) -> MailResult<()>;

    /// Checks if the mail backend is reachable.
    ///
    /// Used by the health check endpoint.
    async fn health_check(&self) -> bool;

    /// Short backend name shown in logs and health reports.
    fn backend(&self) -> &'static str;
}
