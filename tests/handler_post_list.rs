mod common;

use chrono::Duration;
use sqlx::PgPool;

#[sqlx::test]
async fn test_list_shows_published_posts_only(pool: PgPool) {
    let author = common::create_author(&pool, "admin").await;
    common::create_published_post(&pool, author, "visible-post").await;
    common::create_post(&pool, author, "hidden-draft", "draft", common::publish_date()).await;

    let (server, _mailer) = common::make_server(pool);
    let response = server.get("/blog").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Title of visible-post"));
    assert!(html.contains("/blog/2024/3/7/visible-post"));
    assert!(!html.contains("hidden-draft"));
}

#[sqlx::test]
async fn test_list_orders_newest_first(pool: PgPool) {
    let author = common::create_author(&pool, "admin").await;
    let base = common::publish_date();
    common::create_post(&pool, author, "older", "published", base).await;
    common::create_post(&pool, author, "newer", "published", base + Duration::days(1)).await;

    let (server, _mailer) = common::make_server(pool);
    let html = server.get("/blog").await.text();

    let newer = html.find("Title of newer").unwrap();
    let older = html.find("Title of older").unwrap();
    assert!(newer < older);
}

#[sqlx::test]
async fn test_list_paginates_by_three(pool: PgPool) {
    let author = common::create_author(&pool, "admin").await;
    let base = common::publish_date();
    for i in 0..5 {
        let slug = format!("post-{i}");
        common::create_post(&pool, author, &slug, "published", base + Duration::hours(i)).await;
    }

    let (server, _mailer) = common::make_server(pool);

    let first = server.get("/blog").await.text();
    assert!(first.contains("Page 1 of 2."));
    assert!(first.contains("Title of post-4"));
    assert!(first.contains("Title of post-2"));
    assert!(!first.contains("Title of post-1"));
    assert!(first.contains("?page=2"));

    let second = server.get("/blog").add_query_param("page", "2").await.text();
    assert!(second.contains("Page 2 of 2."));
    assert!(second.contains("Title of post-1"));
    assert!(second.contains("Title of post-0"));
}

#[sqlx::test]
async fn test_list_non_numeric_page_is_first_page(pool: PgPool) {
    let author = common::create_author(&pool, "admin").await;
    for i in 0..5 {
        let slug = format!("post-{i}");
        common::create_post(
            &pool,
            author,
            &slug,
            "published",
            common::publish_date() + Duration::hours(i),
        )
        .await;
    }

    let (server, _mailer) = common::make_server(pool);
    let response = server.get("/blog").add_query_param("page", "abc").await;

    response.assert_status_ok();
    assert!(response.text().contains("Page 1 of 2."));
}

#[sqlx::test]
async fn test_list_out_of_range_page_is_last_page(pool: PgPool) {
    let author = common::create_author(&pool, "admin").await;
    for i in 0..5 {
        let slug = format!("post-{i}");
        common::create_post(
            &pool,
            author,
            &slug,
            "published",
            common::publish_date() + Duration::hours(i),
        )
        .await;
    }

    let (server, _mailer) = common::make_server(pool);

    for page in ["999", "0", "-1", "99999999999999999999"] {
        let response = server.get("/blog").add_query_param("page", page).await;
        response.assert_status_ok();
        assert!(response.text().contains("Page 2 of 2."), "page={page}");
    }
}

#[sqlx::test]
async fn test_list_by_tag(pool: PgPool) {
    let author = common::create_author(&pool, "admin").await;
    let jazz = common::create_published_post(&pool, author, "jazz-post").await;
    let rock = common::create_published_post(&pool, author, "rock-post").await;
    common::tag_post(&pool, jazz, &["jazz"]).await;
    common::tag_post(&pool, rock, &["rock"]).await;

    let (server, _mailer) = common::make_server(pool);
    let response = server.get("/blog/tag/jazz").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Posts tagged with \"jazz\""));
    assert!(html.contains("Title of jazz-post"));
    assert!(!html.contains("Title of rock-post"));
}

#[sqlx::test]
async fn test_list_by_tag_without_published_posts_is_empty(pool: PgPool) {
    let author = common::create_author(&pool, "admin").await;
    let draft = common::create_post(&pool, author, "draft", "draft", common::publish_date()).await;
    common::tag_post(&pool, draft, &["lonely"]).await;

    let (server, _mailer) = common::make_server(pool);
    let response = server.get("/blog/tag/lonely").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("No posts yet."));
    assert!(html.contains("Page 1 of 1."));
}

#[sqlx::test]
async fn test_list_by_unknown_tag_is_not_found(pool: PgPool) {
    let (server, _mailer) = common::make_server(pool);

    server.get("/blog/tag/missing").await.assert_status_not_found();
}
