//! Mailer that keeps messages in memory.

use super::service::{MailResult, Mailer, OutgoingEmail};
use async_trait::async_trait;
use std::sync::Mutex;

/// A mailer that records messages in an in-memory outbox.
///
/// Intended for tests that assert on the mail produced by a request.
#[derive(Default)]
pub struct MemoryMailer {
    outbox: Mutex<Vec<OutgoingEmail>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every message sent so far, oldest first.
    pub fn outbox(&self) -> Vec<OutgoingEmail> {
        self.outbox
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: OutgoingEmail) -> MailResult<()> {
        self.outbox
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(email);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_mailer_records_messages_in_order() {
        let mailer = MemoryMailer::new();

        for subject in ["first", "second"] {
            mailer
                .send(OutgoingEmail {
                    from: "admin@myblog.com".to_string(),
                    to: "friend@example.com".to_string(),
                    subject: subject.to_string(),
                    body: String::new(),
                })
                .await
                .unwrap();
        }

        let outbox = mailer.outbox();
        assert_eq!(outbox.len(), 2);
        assert_eq!(outbox[0].subject, "first");
        assert_eq!(outbox[1].subject, "second");
    }
}
