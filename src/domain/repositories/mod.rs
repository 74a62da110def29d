//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern.
//! Implementations live in `crate::infrastructure::persistence`; mock
//! implementations are generated with `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`PostRepository`] - Published post queries and post administration
//! - [`CommentRepository`] - Comment submission and moderation
//! - [`TagRepository`] - Tag lookup and assignment
//! - [`AuthorRepository`] - Author accounts
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod author_repository;
pub mod comment_repository;
pub mod post_repository;
pub mod tag_repository;

pub use author_repository::AuthorRepository;
pub use comment_repository::CommentRepository;
pub use post_repository::PostRepository;
pub use tag_repository::TagRepository;

#[cfg(test)]
pub use author_repository::MockAuthorRepository;
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
#[cfg(test)]
pub use post_repository::MockPostRepository;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
