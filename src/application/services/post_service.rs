//! Public post browsing service.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::entities::{Post, Tag};
use crate::domain::repositories::{PostRepository, TagRepository};
use crate::error::AppError;
use crate::utils::paginator::{Page, Paginator};

/// Number of posts per page of the post list.
pub const POSTS_PER_PAGE: i64 = 3;

/// Maximum number of similar posts shown under a post.
pub const SIMILAR_POSTS_LIMIT: i64 = 4;

/// One page of the public post list and the tag it was filtered by.
#[derive(Debug, Clone)]
pub struct PostListing {
    pub page: Page<Post>,
    pub tag: Option<Tag>,
}

/// Service for reading published posts.
///
/// Drafts are never returned: every lookup goes through the `*_published`
/// repository queries.
pub struct PostService<P: PostRepository, T: TagRepository> {
    post_repository: Arc<P>,
    tag_repository: Arc<T>,
}

impl<P: PostRepository, T: TagRepository> PostService<P, T> {
    /// Creates a new post service.
    pub fn new(post_repository: Arc<P>, tag_repository: Arc<T>) -> Self {
        Self {
            post_repository,
            tag_repository,
        }
    }

    /// Returns one page of published posts, newest first.
    ///
    /// # Arguments
    ///
    /// - `tag_slug` - Restrict the list to posts carrying this tag
    /// - `page` - Raw `page` query value; see [`Paginator::resolve_page`]
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `tag_slug` names no tag.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_published(
        &self,
        tag_slug: Option<&str>,
        page: Option<&str>,
    ) -> Result<PostListing, AppError> {
        let tag = match tag_slug {
            Some(slug) => Some(
                self.tag_repository
                    .find_by_slug(slug)
                    .await?
                    .ok_or_else(|| AppError::not_found("Tag not found", json!({ "slug": slug })))?,
            ),
            None => None,
        };
        let tag_id = tag.as_ref().map(|t| t.id);

        let count = self.post_repository.count_published(tag_id).await?;
        let paginator = Paginator::new(count, POSTS_PER_PAGE);
        let number = paginator.resolve_page(page);

        let posts = if count == 0 {
            Vec::new()
        } else {
            self.post_repository
                .list_published(tag_id, paginator.offset(number), paginator.per_page())
                .await?
        };

        Ok(PostListing {
            page: paginator.page(posts, number),
            tag,
        })
    }

    /// Finds the published post with `slug` published on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no published post matches.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_published_post(&self, date: NaiveDate, slug: &str) -> Result<Post, AppError> {
        self.post_repository
            .find_published_by_date(slug, date)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Post not found",
                    json!({ "slug": slug, "date": date.to_string() }),
                )
            })
    }

    /// Finds a published post by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the post does not exist or is a draft.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_published_post_by_id(&self, id: i64) -> Result<Post, AppError> {
        self.post_repository
            .find_published_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found", json!({ "id": id })))
    }

    /// Published posts sharing tags with `post`, most shared tags first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn similar_posts(&self, post: &Post) -> Result<Vec<Post>, AppError> {
        if post.tags.is_empty() {
            return Ok(Vec::new());
        }

        self.post_repository
            .list_similar_published(post.id, SIMILAR_POSTS_LIMIT)
            .await
    }

    /// Checks database connectivity.
    pub async fn health_check(&self) -> bool {
        match self.post_repository.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                false
            }
        }
    }
}
