//! Operational HTTP surface: health reporting and shared middleware.
//!
//! # Modules
//!
//! - [`dto`] - JSON response types
//! - [`handlers`] - Health check handler
//! - [`middleware`] - Rate limiting and request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
