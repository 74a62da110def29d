//! Post list page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::domain::entities::{Post, Tag};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::paginator::Page;

/// Query parameters of the post list.
///
/// `page` is kept as raw text: anything that is not a valid page number is
/// resolved by the paginator instead of rejected.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
}

/// Template for the post list.
#[derive(Template, WebTemplate)]
#[template(path = "blog/post/list.html")]
pub struct PostListTemplate {
    pub page: Page<Post>,
    pub tag: Option<Tag>,
}

/// Renders one page of published posts.
///
/// # Endpoint
///
/// `GET /blog?page=N`
pub async fn post_list_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<PostListTemplate, AppError> {
    render_list(&state, None, query).await
}

/// Renders one page of published posts carrying a tag.
///
/// # Endpoint
///
/// `GET /blog/tag/{tag_slug}?page=N`
///
/// # Errors
///
/// Responds `404 Not Found` if the tag does not exist.
pub async fn post_list_by_tag_handler(
    State(state): State<AppState>,
    Path(tag_slug): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<PostListTemplate, AppError> {
    render_list(&state, Some(&tag_slug), query).await
}

async fn render_list(
    state: &AppState,
    tag_slug: Option<&str>,
    query: ListQuery,
) -> Result<PostListTemplate, AppError> {
    let listing = state
        .post_service
        .list_published(tag_slug, query.page.as_deref())
        .await?;

    Ok(PostListTemplate {
        page: listing.page,
        tag: listing.tag,
    })
}
