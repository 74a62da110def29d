//! Outgoing mail delivery.
//!
//! Provides a [`Mailer`] trait with three implementations:
//! - [`SmtpMailer`] - Production SMTP relay via `lettre`
//! - [`ConsoleMailer`] - Writes messages to the log instead of sending them
//! - [`MemoryMailer`] - Keeps messages in memory for tests

mod console_mailer;
mod memory_mailer;
mod service;
mod smtp_mailer;

pub use console_mailer::ConsoleMailer;
pub use memory_mailer::MemoryMailer;
pub use service::{MailError, MailResult, Mailer, OutgoingEmail};
pub use smtp_mailer::{SmtpMailer, SmtpSettings};

#[cfg(test)]
pub use service::MockMailer;
