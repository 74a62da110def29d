//! PostgreSQL implementation of post repository.

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use super::contains_pattern;
use crate::domain::entities::{NewPost, Post, PostFilter, PostStatus, Tag};
use crate::domain::repositories::PostRepository;
use crate::error::AppError;

/// Columns selected for every post query. Requires `posts p` joined with `authors a`.
const POST_COLUMNS: &str = r#"
    p.id, p.title, p.slug, a.username AS author, p.body,
    p.publish, p.created, p.updated, p.status
"#;

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    slug: String,
    author: String,
    body: String,
    publish: DateTime<Utc>,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    status: String,
}

impl PostRow {
    fn into_post(self, tags: Vec<Tag>) -> Result<Post, AppError> {
        let status: PostStatus = self.status.parse().map_err(|reason: String| {
            AppError::internal("Corrupt post status", json!({ "id": self.id, "reason": reason }))
        })?;

        Ok(Post {
            id: self.id,
            title: self.title,
            slug: self.slug,
            author: self.author,
            body: self.body,
            publish: self.publish,
            created: self.created,
            updated: self.updated,
            status,
            tags,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PostTagRow {
    post_id: i64,
    id: i64,
    name: String,
    slug: String,
}

/// PostgreSQL repository for blog posts.
///
/// Tags are loaded with one extra query per call, keyed by the ids of the
/// posts returned.
pub struct PgPostRepository {
    pool: Arc<PgPool>,
}

impl PgPostRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn load_tags(&self, post_ids: &[i64]) -> Result<HashMap<i64, Vec<Tag>>, AppError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, PostTagRow>(
            r#"
            SELECT pt.post_id, t.id, t.name, t.slug
            FROM post_tags pt
            JOIN tags t ON t.id = pt.tag_id
            WHERE pt.post_id = ANY($1)
            ORDER BY t.name
            "#,
        )
        .bind(post_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut tags: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in rows {
            tags.entry(row.post_id)
                .or_default()
                .push(Tag::new(row.id, row.name, row.slug));
        }

        Ok(tags)
    }

    /// Attaches tags to rows, keeping the row order.
    async fn with_tags(&self, rows: Vec<PostRow>) -> Result<Vec<Post>, AppError> {
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut tags = self.load_tags(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let post_tags = tags.remove(&row.id).unwrap_or_default();
                row.into_post(post_tags)
            })
            .collect()
    }

    async fn with_tags_single(&self, row: Option<PostRow>) -> Result<Option<Post>, AppError> {
        match row {
            Some(row) => Ok(self.with_tags(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn count_published(&self, tag_id: Option<i64>) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM posts p
            WHERE p.status = 'published'
              AND ($1::bigint IS NULL OR EXISTS (
                    SELECT 1 FROM post_tags pt
                    WHERE pt.post_id = p.id AND pt.tag_id = $1))
            "#,
        )
        .bind(tag_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn list_published(
        &self,
        tag_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>, AppError> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN authors a ON a.id = p.author_id
            WHERE p.status = 'published'
              AND ($1::bigint IS NULL OR EXISTS (
                    SELECT 1 FROM post_tags pt
                    WHERE pt.post_id = p.id AND pt.tag_id = $1))
            ORDER BY p.publish DESC, p.id DESC
            LIMIT $2 OFFSET $3
            "#
        );

        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(tag_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        self.with_tags(rows).await
    }

    async fn find_published_by_date(
        &self,
        slug: &str,
        date: NaiveDate,
    ) -> Result<Option<Post>, AppError> {
        let day_start = date.and_time(NaiveTime::MIN).and_utc();
        let Some(next_day) = date.checked_add_days(Days::new(1)) else {
            return Ok(None);
        };
        let day_end = next_day.and_time(NaiveTime::MIN).and_utc();

        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN authors a ON a.id = p.author_id
            WHERE p.slug = $1
              AND p.status = 'published'
              AND p.publish >= $2
              AND p.publish < $3
            LIMIT 1
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(slug)
            .bind(day_start)
            .bind(day_end)
            .fetch_optional(self.pool.as_ref())
            .await?;

        self.with_tags_single(row).await
    }

    async fn find_published_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN authors a ON a.id = p.author_id
            WHERE p.id = $1 AND p.status = 'published'
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        self.with_tags_single(row).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN authors a ON a.id = p.author_id
            WHERE p.id = $1
            "#
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        self.with_tags_single(row).await
    }

    async fn list_similar_published(
        &self,
        post_id: i64,
        limit: i64,
    ) -> Result<Vec<Post>, AppError> {
        // Joining post_tags restricted to the source post's tags yields one row
        // per shared tag, so COUNT(*) per post is the overlap.
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN authors a ON a.id = p.author_id
            JOIN post_tags pt ON pt.post_id = p.id
            WHERE p.status = 'published'
              AND p.id <> $1
              AND pt.tag_id IN (SELECT tag_id FROM post_tags WHERE post_id = $1)
            GROUP BY p.id, a.username
            ORDER BY COUNT(*) DESC, p.publish DESC, p.id DESC
            LIMIT $2
            "#
        );

        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(post_id)
            .bind(limit)
            .fetch_all(self.pool.as_ref())
            .await?;

        self.with_tags(rows).await
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, PostRow>(
            r#"
            WITH inserted AS (
                INSERT INTO posts (title, slug, author_id, body, publish, status)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, title, slug, author_id, body, publish, created, updated, status
            )
            SELECT
                i.id, i.title, i.slug, a.username AS author, i.body,
                i.publish, i.created, i.updated, i.status
            FROM inserted i
            JOIN authors a ON a.id = i.author_id
            "#,
        )
        .bind(&new_post.title)
        .bind(&new_post.slug)
        .bind(new_post.author_id)
        .bind(&new_post.body)
        .bind(new_post.publish)
        .bind(new_post.status.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict { details, .. } => AppError::conflict(
                "A post with this slug is already published on that date",
                json!({ "slug": new_post.slug, "constraint": details["constraint"] }),
            ),
            other => other,
        })?;

        if !new_post.tag_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO post_tags (post_id, tag_id)
                SELECT $1, UNNEST($2::bigint[])
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(row.id)
            .bind(&new_post.tag_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let id = row.id;
        self.with_tags_single(Some(row))
            .await?
            .ok_or_else(|| AppError::internal("Created post vanished", json!({ "id": id })))
    }

    async fn set_status(&self, id: i64, status: PostStatus) -> Result<Post, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE posts SET status = $2, updated = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Post not found", json!({ "id": id })));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found", json!({ "id": id })))
    }

    async fn search(&self, filter: PostFilter) -> Result<Vec<Post>, AppError> {
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts p
            JOIN authors a ON a.id = p.author_id
            WHERE ($1::text IS NULL OR p.status = $1)
              AND ($2::text IS NULL OR p.title ILIKE $2 OR p.body ILIKE $2)
              AND ($3::text IS NULL OR a.username = $3)
            ORDER BY p.status, p.publish
            "#
        );

        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.search.as_deref().map(contains_pattern))
            .bind(filter.author)
            .fetch_all(self.pool.as_ref())
            .await?;

        self.with_tags(rows).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
