//! Comment submission and moderation service.

use std::sync::Arc;

use crate::domain::entities::{Comment, CommentFilter, NewComment, Post};
use crate::domain::repositories::CommentRepository;
use crate::error::AppError;

/// Visitor input for a new comment, already validated by the form layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentInput {
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Service for post comments.
///
/// New comments are always stored inactive and only become visible once a
/// moderator approves them.
pub struct CommentService<C: CommentRepository> {
    repository: Arc<C>,
}

impl<C: CommentRepository> CommentService<C> {
    /// Creates a new comment service.
    pub fn new(repository: Arc<C>) -> Self {
        Self { repository }
    }

    /// Active comments of `post`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn active_comments(&self, post: &Post) -> Result<Vec<Comment>, AppError> {
        self.repository.list_active_for_post(post.id).await
    }

    /// Stores a visitor comment on `post`, pending moderation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn submit_comment(&self, post: &Post, input: CommentInput) -> Result<Comment, AppError> {
        let new_comment = NewComment {
            post_id: post.id,
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            body: input.body.trim().to_string(),
        };

        let comment = self.repository.create(new_comment).await?;
        tracing::info!(post_id = post.id, comment_id = comment.id, "Comment submitted");

        Ok(comment)
    }

    /// Lists comments for moderation, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn search(&self, filter: CommentFilter) -> Result<Vec<Comment>, AppError> {
        self.repository.search(filter).await
    }

    /// Approves (`active = true`) or hides a comment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the comment does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn moderate(&self, comment_id: i64, active: bool) -> Result<Comment, AppError> {
        let comment = self.repository.set_active(comment_id, active).await?;
        tracing::info!(comment_id, active, "Comment moderated");
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PostStatus;
    use crate::domain::repositories::MockCommentRepository;
    use chrono::Utc;
    use serde_json::json;

    fn create_test_post(id: i64) -> Post {
        let now = Utc::now();
        Post {
            id,
            title: "Title".to_string(),
            slug: "title".to_string(),
            author: "admin".to_string(),
            body: "Body".to_string(),
            publish: now,
            created: now,
            updated: now,
            status: PostStatus::Published,
            tags: vec![],
        }
    }

    fn create_test_comment(id: i64, post_id: i64, active: bool) -> Comment {
        let now = Utc::now();
        Comment {
            id,
            post_id,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            body: "Nice post".to_string(),
            created: now,
            updated: now,
            active,
        }
    }

    #[tokio::test]
    async fn test_submit_comment_trims_input() {
        let mut mock_repo = MockCommentRepository::new();

        mock_repo
            .expect_create()
            .withf(|c| {
                c.post_id == 4 && c.name == "Ana" && c.email == "ana@example.com" && c.body == "Nice post"
            })
            .times(1)
            .returning(|c| Ok(create_test_comment(1, c.post_id, false)));

        let service = CommentService::new(Arc::new(mock_repo));
        let comment = service
            .submit_comment(
                &create_test_post(4),
                CommentInput {
                    name: "  Ana ".to_string(),
                    email: "ana@example.com ".to_string(),
                    body: "\nNice post\n".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(!comment.active);
        assert_eq!(comment.post_id, 4);
    }

    #[tokio::test]
    async fn test_active_comments_uses_post_id() {
        let mut mock_repo = MockCommentRepository::new();

        mock_repo
            .expect_list_active_for_post()
            .withf(|post_id| *post_id == 9)
            .times(1)
            .returning(|post_id| Ok(vec![create_test_comment(1, post_id, true)]));

        let service = CommentService::new(Arc::new(mock_repo));
        let comments = service.active_comments(&create_test_post(9)).await.unwrap();

        assert_eq!(comments.len(), 1);
        assert!(comments.iter().all(|c| c.active));
    }

    #[tokio::test]
    async fn test_moderate_missing_comment() {
        let mut mock_repo = MockCommentRepository::new();

        mock_repo
            .expect_set_active()
            .returning(|id, _| Err(AppError::not_found("Comment not found", json!({ "id": id }))));

        let service = CommentService::new(Arc::new(mock_repo));
        let result = service.moderate(42, true).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_search_passes_filter() {
        let mut mock_repo = MockCommentRepository::new();
        let expected = CommentFilter {
            active: Some(false),
            search: Some("spam".to_string()),
        };
        let matcher = expected.clone();

        mock_repo
            .expect_search()
            .withf(move |f| *f == matcher)
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = CommentService::new(Arc::new(mock_repo));
        assert!(service.search(expected).await.unwrap().is_empty());
    }
}
