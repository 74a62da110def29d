//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::post_service::PostService`] - Published post listing, lookup and similar posts
//! - [`services::comment_service::CommentService`] - Comment submission and moderation
//! - [`services::share_service::ShareService`] - Recommending posts by email
//! - [`services::authoring_service::AuthoringService`] - Post, tag and author administration

pub mod services;
