//! Repository trait for tag data access.

use crate::domain::entities::Tag;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for tags and their assignment to posts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTagRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Finds a tag by slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, AppError>;

    /// Returns the tag whose slug is `slug`, creating it as `name` if absent.
    ///
    /// Tag names and slugs are both unique, so "Rust" and "rust" resolve to
    /// the same tag.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_or_create(&self, name: &str, slug: &str) -> Result<Tag, AppError>;

    /// Replaces the tag set of a post.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_post_tags(&self, post_id: i64, tag_ids: Vec<i64>) -> Result<(), AppError>;
}
