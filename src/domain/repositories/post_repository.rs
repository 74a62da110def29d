//! Repository trait for post data access.

use crate::domain::entities::{NewPost, Post, PostFilter, PostStatus};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Repository interface for blog posts.
///
/// Every `*_published` query only ever returns posts whose status is
/// [`PostStatus::Published`]. Returned posts carry their author name and tags.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPostRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Counts published posts, optionally restricted to those carrying `tag_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_published(&self, tag_id: Option<i64>) -> Result<i64, AppError>;

    /// Lists published posts, newest first.
    ///
    /// # Arguments
    ///
    /// - `tag_id` - Optional tag filter
    /// - `offset` - Number of posts to skip
    /// - `limit` - Maximum number of posts returned
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_published(
        &self,
        tag_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>, AppError>;

    /// Finds the published post with `slug` whose publish timestamp falls on
    /// `date` (UTC).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_published_by_date(
        &self,
        slug: &str,
        date: NaiveDate,
    ) -> Result<Option<Post>, AppError>;

    /// Finds a published post by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_published_by_id(&self, id: i64) -> Result<Option<Post>, AppError>;

    /// Finds a post by id regardless of status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError>;

    /// Lists published posts sharing at least one tag with `post_id`, excluding
    /// the post itself.
    ///
    /// Ordered by the number of shared tags (descending), then by publish
    /// date (descending), truncated to `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_similar_published(
        &self,
        post_id: i64,
        limit: i64,
    ) -> Result<Vec<Post>, AppError>;

    /// Creates a new post and attaches `new_post.tag_ids`.
    ///
    /// The post row and its tag links are written in one transaction, so a
    /// failure leaves no partially tagged post behind.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the slug is already used on the same
    /// publish date.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_post: NewPost) -> Result<Post, AppError>;

    /// Changes the publication status of a post.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the post does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_status(&self, id: i64, status: PostStatus) -> Result<Post, AppError>;

    /// Lists posts of any status for administration, ordered by status then
    /// publish date.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn search(&self, filter: PostFilter) -> Result<Vec<Post>, AppError>;

    /// Checks database connectivity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the database is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
