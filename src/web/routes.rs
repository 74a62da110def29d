//! Blog route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    post_comment_handler, post_detail_handler, post_list_by_tag_handler, post_list_handler,
    post_share_form_handler, post_share_handler,
};
use axum::{Router, routing::get};

/// Blog pages that only read data or store a comment.
///
/// # Endpoints
///
/// - `GET  /` - Post list (`?page=N`)
/// - `GET  /tag/{tag_slug}` - Post list filtered by tag
/// - `GET  /{year}/{month}/{day}/{slug}` - Post detail
/// - `POST /{year}/{month}/{day}/{slug}` - Comment submission
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(post_list_handler))
        .route("/tag/{tag_slug}", get(post_list_by_tag_handler))
        .route(
            "/{year}/{month}/{day}/{slug}",
            get(post_detail_handler).post(post_comment_handler),
        )
}

/// Share page, which sends email on submission.
///
/// # Endpoints
///
/// - `GET  /{post_id}/share` - Empty share form
/// - `POST /{post_id}/share` - Share form submission
pub fn share_routes() -> Router<AppState> {
    Router::new().route(
        "/{post_id}/share",
        get(post_share_form_handler).post(post_share_handler),
    )
}

/// Every blog page, without rate limiting. Mounted under `/blog`.
pub fn blog_routes() -> Router<AppState> {
    Router::new().merge(public_routes()).merge(share_routes())
}
