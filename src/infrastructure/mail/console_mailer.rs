//! Mailer that writes messages to the log.

use super::service::{MailResult, Mailer, OutgoingEmail};
use async_trait::async_trait;
use tracing::{debug, info};

/// A mailer that logs every message instead of delivering it.
///
/// # Use Cases
///
/// - Development environments without an SMTP relay
/// - Demo deployments where shared posts should not leave the server
pub struct ConsoleMailer;

impl ConsoleMailer {
    /// Creates a new ConsoleMailer instance.
    pub fn new() -> Self {
        debug!("Using ConsoleMailer (mail is logged, not sent)");
        Self
    }
}

impl Default for ConsoleMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, email: OutgoingEmail) -> MailResult<()> {
        info!(
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            body = %email.body,
            "Outgoing email"
        );
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "console"
    }
}
