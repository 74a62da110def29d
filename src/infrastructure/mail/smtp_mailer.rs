//! SMTP mailer built on `lettre`.

use super::service::{MailError, MailResult, Mailer, OutgoingEmail};
use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

/// SMTP connection settings.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Upgrade the connection with STARTTLS. Disable only for local relays.
    pub starttls: bool,
}

/// Mailer delivering through an SMTP relay.
///
/// The transport keeps a small connection pool; each [`Mailer::send`] call is
/// a single delivery attempt.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Builds the SMTP transport. No connection is opened until the first send.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Transport`] if the relay host cannot be used for
    /// STARTTLS.
    pub fn new(settings: &SmtpSettings) -> MailResult<Self> {
        let mut builder = if settings.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                .map_err(|e| MailError::Transport(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
        };

        builder = builder.port(settings.port);

        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        info!(host = %settings.host, port = settings.port, "SMTP mailer configured");

        Ok(Self {
            transport: builder.build(),
        })
    }
}

/// Converts an [`OutgoingEmail`] into a `lettre` message.
fn build_message(email: OutgoingEmail) -> MailResult<Message> {
    let from: Mailbox = email
        .from
        .parse()
        .map_err(|_| MailError::Address(email.from.clone()))?;
    let to: Mailbox = email
        .to
        .parse()
        .map_err(|_| MailError::Address(email.to.clone()))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject)
        .header(ContentType::TEXT_PLAIN)
        .body(email.body)
        .map_err(|e| MailError::Message(e.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> MailResult<()> {
        let message = build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(())
    }

    async fn health_check(&self) -> bool {
        match self.transport.test_connection().await {
            Ok(connected) => connected,
            Err(e) => {
                warn!(error = %e, "SMTP health check failed");
                false
            }
        }
    }

    fn backend(&self) -> &'static str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(from: &str, to: &str) -> OutgoingEmail {
        OutgoingEmail {
            from: from.to_string(),
            to: to.to_string(),
            subject: "Ana recommends you read Jazz".to_string(),
            body: "Read Jazz at http://localhost:8000/blog/2024/1/2/jazz".to_string(),
        }
    }

    #[test]
    fn test_build_message_with_valid_addresses() {
        let message = build_message(email("admin@myblog.com", "friend@example.com")).unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("To: friend@example.com"));
        assert!(formatted.contains("Subject: Ana recommends you read Jazz"));
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() {
        let result = build_message(email("admin@myblog.com", "not an address"));
        assert!(matches!(result, Err(MailError::Address(addr)) if addr == "not an address"));
    }

    #[tokio::test]
    async fn test_new_without_tls_builds_transport() {
        let settings = SmtpSettings {
            host: "localhost".to_string(),
            port: 1025,
            username: None,
            password: None,
            starttls: false,
        };

        let mailer = SmtpMailer::new(&settings).unwrap();
        assert_eq!(mailer.backend(), "smtp");
    }
}
