//! PostgreSQL implementation of comment repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use super::contains_pattern;
use crate::domain::entities::{Comment, CommentFilter, NewComment};
use crate::domain::repositories::CommentRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    name: String,
    email: String,
    body: String,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    active: bool,
}

impl From<CommentRow> for Comment {
    fn from(r: CommentRow) -> Self {
        Comment {
            id: r.id,
            post_id: r.post_id,
            name: r.name,
            email: r.email,
            body: r.body,
            created: r.created,
            updated: r.updated,
            active: r.active,
        }
    }
}

/// PostgreSQL repository for post comments.
pub struct PgCommentRepository {
    pool: Arc<PgPool>,
}

impl PgCommentRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn list_active_for_post(&self, post_id: i64) -> Result<Vec<Comment>, AppError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, name, email, body, created, updated, active
            FROM comments
            WHERE post_id = $1 AND active = TRUE
            ORDER BY created, id
            "#,
        )
        .bind(post_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn create(&self, new_comment: NewComment) -> Result<Comment, AppError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (post_id, name, email, body, active)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING id, post_id, name, email, body, created, updated, active
            "#,
        )
        .bind(new_comment.post_id)
        .bind(new_comment.name)
        .bind(new_comment.email)
        .bind(new_comment.body)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn search(&self, filter: CommentFilter) -> Result<Vec<Comment>, AppError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, name, email, body, created, updated, active
            FROM comments
            WHERE ($1::boolean IS NULL OR active = $1)
              AND ($2::text IS NULL OR name ILIKE $2 OR email ILIKE $2 OR body ILIKE $2)
            ORDER BY created DESC, id DESC
            "#,
        )
        .bind(filter.active)
        .bind(filter.search.as_deref().map(contains_pattern))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<Comment, AppError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            UPDATE comments SET active = $2, updated = NOW()
            WHERE id = $1
            RETURNING id, post_id, name, email, body, created, updated, active
            "#,
        )
        .bind(id)
        .bind(active)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Comment::from)
            .ok_or_else(|| AppError::not_found("Comment not found", json!({ "id": id })))
    }
}
