//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{CommentService, PostService, ShareService};
use crate::infrastructure::persistence::{PgCommentRepository, PgPostRepository, PgTagRepository};

/// Post service backed by PostgreSQL repositories.
pub type PgPostService = PostService<PgPostRepository, PgTagRepository>;

/// Comment service backed by PostgreSQL.
pub type PgCommentService = CommentService<PgCommentRepository>;

/// State shared by every request. All services are immutable and cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub post_service: Arc<PgPostService>,
    pub comment_service: Arc<PgCommentService>,
    pub share_service: Arc<ShareService>,
}
