//! Domain layer containing blog entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Posts, comments, tags and authors
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.
//! Repository traits are implemented in `crate::infrastructure::persistence` and
//! consumed by services in [`crate::application::services`].

pub mod entities;
pub mod repositories;
