//! Post and author administration service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use validator::ValidateEmail;

use crate::domain::entities::{Author, NewAuthor, NewPost, Post, PostFilter, PostStatus, Tag};
use crate::domain::repositories::{AuthorRepository, PostRepository, TagRepository};
use crate::error::AppError;
use crate::utils::slug::{slugify, validate_slug};

const MAX_TITLE_LENGTH: usize = 250;
const MAX_USERNAME_LENGTH: usize = 150;
const MAX_TAG_LENGTH: usize = 100;
const MAX_EMAIL_LENGTH: usize = 254;

/// Input for [`AuthoringService::create_post`].
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    /// Username of an existing author.
    pub author: String,
    pub title: String,
    /// Explicit slug. Derived from the title when `None`.
    pub slug: Option<String>,
    pub body: String,
    /// Tag names, created on first use.
    pub tags: Vec<String>,
    /// Create the post as published instead of draft.
    pub publish: bool,
}

/// Service behind the admin CLI.
///
/// Validates titles, slugs and tag names before they reach the database and
/// resolves tag names to tags, creating missing ones.
pub struct AuthoringService<P: PostRepository, T: TagRepository, A: AuthorRepository> {
    post_repository: Arc<P>,
    tag_repository: Arc<T>,
    author_repository: Arc<A>,
}

impl<P: PostRepository, T: TagRepository, A: AuthorRepository> AuthoringService<P, T, A> {
    /// Creates a new authoring service.
    pub fn new(post_repository: Arc<P>, tag_repository: Arc<T>, author_repository: Arc<A>) -> Self {
        Self {
            post_repository,
            tag_repository,
            author_repository,
        }
    }

    /// Creates an author account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the username is empty or too long,
    /// or the email is malformed.
    /// Returns [`AppError::Conflict`] if the username is taken.
    pub async fn create_author(&self, username: &str, email: &str) -> Result<Author, AppError> {
        let username = username.trim();
        let email = email.trim();

        if username.is_empty() || username.chars().count() > MAX_USERNAME_LENGTH {
            return Err(AppError::bad_request(
                "Username must be 1-150 characters",
                json!({ "username": username }),
            ));
        }

        if !email.is_empty() && (!email.validate_email() || email.chars().count() > MAX_EMAIL_LENGTH) {
            return Err(AppError::bad_request(
                "Invalid email address",
                json!({ "email": email }),
            ));
        }

        self.author_repository
            .create(NewAuthor {
                username: username.to_string(),
                email: email.to_string(),
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => AppError::conflict(
                    "Username already exists",
                    json!({ "username": username }),
                ),
                other => other,
            })
    }

    /// Lists all authors.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_authors(&self) -> Result<Vec<Author>, AppError> {
        self.author_repository.list().await
    }

    /// Creates a post with its tags, published now or as a draft.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty or too long title, an
    /// empty body, an invalid slug or tag name.
    /// Returns [`AppError::NotFound`] if the author does not exist.
    /// Returns [`AppError::Conflict`] if the slug is already used today.
    pub async fn create_post(&self, draft: PostDraft) -> Result<Post, AppError> {
        let title = draft.title.trim();
        if title.is_empty() || title.chars().count() > MAX_TITLE_LENGTH {
            return Err(AppError::bad_request(
                "Title must be 1-250 characters",
                json!({ "provided_length": title.chars().count() }),
            ));
        }

        if draft.body.trim().is_empty() {
            return Err(AppError::bad_request("Body must not be empty", json!({})));
        }

        let slug = match draft.slug.as_deref().map(str::trim) {
            Some(slug) => {
                validate_slug(slug)?;
                slug.to_string()
            }
            None => slugify(title)?,
        };

        let author = self
            .author_repository
            .find_by_username(draft.author.trim())
            .await?
            .ok_or_else(|| {
                AppError::not_found("Author not found", json!({ "username": draft.author }))
            })?;

        let tags = self.resolve_tags(&draft.tags).await?;

        let status = if draft.publish {
            PostStatus::Published
        } else {
            PostStatus::Draft
        };

        let mut post = self
            .post_repository
            .create(NewPost {
                title: title.to_string(),
                slug,
                author_id: author.id,
                body: draft.body,
                publish: Utc::now(),
                status,
                tag_ids: tags.iter().map(|t| t.id).collect(),
            })
            .await?;
        post.tags = tags;

        tracing::info!(post_id = post.id, slug = %post.slug, status = %post.status, "Post created");
        Ok(post)
    }

    /// Publishes or unpublishes a post.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the post does not exist.
    pub async fn set_post_status(&self, id: i64, status: PostStatus) -> Result<Post, AppError> {
        let post = self.post_repository.set_status(id, status).await?;
        tracing::info!(post_id = id, status = %status, "Post status changed");
        Ok(post)
    }

    /// Replaces the tag set of a post.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the post does not exist.
    /// Returns [`AppError::Validation`] for an invalid tag name.
    pub async fn retag_post(&self, id: i64, tag_names: &[String]) -> Result<Post, AppError> {
        let mut post = self
            .post_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found", json!({ "id": id })))?;

        let tags = self.resolve_tags(tag_names).await?;
        self.tag_repository
            .set_post_tags(id, tags.iter().map(|t| t.id).collect())
            .await?;
        post.tags = tags;

        Ok(post)
    }

    /// Lists posts of any status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_posts(&self, filter: PostFilter) -> Result<Vec<Post>, AppError> {
        self.post_repository.search(filter).await
    }

    /// Resolves tag names to tags, creating missing ones. Blank names are
    /// skipped and names that slugify to the same tag are merged.
    async fn resolve_tags(&self, names: &[String]) -> Result<Vec<Tag>, AppError> {
        let mut tags: Vec<Tag> = Vec::new();

        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            if name.chars().count() > MAX_TAG_LENGTH {
                return Err(AppError::bad_request(
                    "Tag names must be at most 100 characters",
                    json!({ "tag": name }),
                ));
            }

            let slug = slugify(name)?;
            if tags.iter().any(|t| t.slug == slug) {
                continue;
            }

            tags.push(self.tag_repository.get_or_create(name, &slug).await?);
        }

        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }
}
