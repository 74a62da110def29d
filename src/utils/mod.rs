//! Utility functions shared by services and handlers.
//!
//! - [`paginator`] - Page number resolution and page metadata
//! - [`slug`] - Slug generation and validation

pub mod paginator;
pub mod slug;
