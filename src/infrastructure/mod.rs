//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and mail delivery.
//!
//! # Modules
//!
//! - [`mail`] - Outgoing mail (SMTP, console and in-memory implementations)
//! - [`persistence`] - PostgreSQL repository implementations

pub mod mail;
pub mod persistence;
