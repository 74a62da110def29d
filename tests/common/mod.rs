#![allow(dead_code)]

use axum::{Router, routing::get};
use axum_test::TestServer;
use blog::api::handlers::health_handler;
use blog::application::services::{CommentService, PostService, ShareService};
use blog::infrastructure::mail::MemoryMailer;
use blog::infrastructure::persistence::{PgCommentRepository, PgPostRepository, PgTagRepository};
use blog::state::AppState;
use blog::web;
use chrono::{DateTime, TimeZone, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use url::Url;

/// Publish timestamp used by most fixtures: 7 March 2024, 09:30 UTC.
pub fn publish_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 7, 9, 30, 0).unwrap()
}

/// Well-formed address of 312 characters, longer than the 254 a column can hold.
pub fn long_email() -> String {
    let label = "b".repeat(60);
    format!("{}@{label}.{label}.{label}.{label}.com", "a".repeat(64))
}

pub async fn create_author(pool: &PgPool, username: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO authors (username, email) VALUES ($1, $2) RETURNING id")
        .bind(username)
        .bind(format!("{username}@example.com"))
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_post(
    pool: &PgPool,
    author_id: i64,
    slug: &str,
    status: &str,
    publish: DateTime<Utc>,
) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO posts (title, slug, author_id, body, publish, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(format!("Title of {slug}"))
    .bind(slug)
    .bind(author_id)
    .bind(format!("Body of {slug}.\n\nSecond paragraph."))
    .bind(publish)
    .bind(status)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_published_post(pool: &PgPool, author_id: i64, slug: &str) -> i64 {
    create_post(pool, author_id, slug, "published", publish_date()).await
}

/// Attaches tags to a post, creating them (name = slug) when missing.
pub async fn tag_post(pool: &PgPool, post_id: i64, tags: &[&str]) {
    for tag in tags {
        let tag_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO tags (name, slug) VALUES ($1, $1)
            ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
        .bind(tag)
        .fetch_one(pool)
        .await
        .unwrap();

        sqlx::query("INSERT INTO post_tags (post_id, tag_id) VALUES ($1, $2)")
            .bind(post_id)
            .bind(tag_id)
            .execute(pool)
            .await
            .unwrap();
    }
}

pub async fn create_comment(pool: &PgPool, post_id: i64, name: &str, active: bool) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO comments (post_id, name, email, body, active)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(post_id)
    .bind(name)
    .bind("visitor@example.com")
    .bind(format!("Comment from {name}"))
    .bind(active)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_comments(pool: &PgPool, post_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> (AppState, Arc<MemoryMailer>) {
    let pool = Arc::new(pool);
    let mailer = Arc::new(MemoryMailer::new());

    let post_repo = Arc::new(PgPostRepository::new(pool.clone()));
    let tag_repo = Arc::new(PgTagRepository::new(pool.clone()));
    let comment_repo = Arc::new(PgCommentRepository::new(pool));

    let state = AppState {
        post_service: Arc::new(PostService::new(post_repo, tag_repo)),
        comment_service: Arc::new(CommentService::new(comment_repo)),
        share_service: Arc::new(ShareService::new(
            mailer.clone(),
            Url::parse("http://testserver").unwrap(),
            "admin@myblog.com",
        )),
    };

    (state, mailer)
}

/// Test server with every blog page and the health check, without rate limiting.
pub fn make_server(pool: PgPool) -> (TestServer, Arc<MemoryMailer>) {
    let (state, mailer) = create_test_state(pool);
    let app = Router::new()
        .route("/health", get(health_handler))
        .nest("/blog", web::routes::blog_routes())
        .with_state(state);

    (TestServer::new(app).unwrap(), mailer)
}
