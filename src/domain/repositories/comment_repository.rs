//! Repository trait for comment data access.

use crate::domain::entities::{Comment, CommentFilter, NewComment};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for post comments.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCommentRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Lists the active comments of a post, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_active_for_post(&self, post_id: i64) -> Result<Vec<Comment>, AppError>;

    /// Stores a new, inactive comment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors, including a missing
    /// parent post.
    async fn create(&self, new_comment: NewComment) -> Result<Comment, AppError>;

    /// Lists comments for moderation, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn search(&self, filter: CommentFilter) -> Result<Vec<Comment>, AppError>;

    /// Sets the moderation flag of a comment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the comment does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_active(&self, id: i64, active: bool) -> Result<Comment, AppError>;
}
