//! Public blog pages.
//!
//! Server-side rendered HTML built with Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`forms`] - Comment and share form payloads with validation
//! - [`handlers`] - Page handlers
//! - [`routes`] - Blog route configuration

pub mod forms;
pub mod handlers;
pub mod routes;
