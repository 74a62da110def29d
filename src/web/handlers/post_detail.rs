//! Post detail page and comment submission.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::{Path, State};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::domain::entities::{Comment, Post};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::forms::{CommentForm, FormErrors, clean};

/// Path segments of a post URL, parsed by the handler so that any
/// malformed date is a 404 like any other missing post.
#[derive(Debug, Deserialize)]
pub struct PostDatePath {
    pub year: String,
    pub month: String,
    pub day: String,
    pub slug: String,
}

/// Years a post URL may carry. Wider chrono dates cannot be stored.
const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

impl PostDatePath {
    fn date(&self) -> Option<NaiveDate> {
        let year = self.year.parse().ok().filter(|y| YEARS.contains(y))?;
        let month = self.month.parse().ok()?;
        let day = self.day.parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Template for the post detail page.
#[derive(Template, WebTemplate)]
#[template(path = "blog/post/detail.html")]
pub struct PostDetailTemplate {
    pub post: Post,
    pub comments: Vec<Comment>,
    /// The comment just submitted, if any. It is pending moderation.
    pub new_comment: Option<Comment>,
    pub comment_form: CommentForm,
    pub errors: FormErrors,
    pub similar_posts: Vec<Post>,
}

/// Renders a published post with its active comments and similar posts.
///
/// # Endpoint
///
/// `GET /blog/{year}/{month}/{day}/{slug}`
///
/// # Errors
///
/// Responds `404 Not Found` if no published post matches the date and slug.
pub async fn post_detail_handler(
    State(state): State<AppState>,
    Path(path): Path<PostDatePath>,
) -> Result<PostDetailTemplate, AppError> {
    let post = find_post(&state, &path).await?;
    render_detail(&state, post, None, CommentForm::default(), FormErrors::default()).await
}

/// Handles the comment form.
///
/// A valid comment is stored inactive and the page is rendered with
/// `new_comment` set. An invalid form is redisplayed with its errors.
///
/// # Endpoint
///
/// `POST /blog/{year}/{month}/{day}/{slug}`
pub async fn post_comment_handler(
    State(state): State<AppState>,
    Path(path): Path<PostDatePath>,
    Form(form): Form<CommentForm>,
) -> Result<PostDetailTemplate, AppError> {
    let post = find_post(&state, &path).await?;

    match clean(&form, CommentForm::trimmed) {
        Ok(cleaned) => {
            let comment = state
                .comment_service
                .submit_comment(&post, cleaned.into())
                .await?;
            render_detail(
                &state,
                post,
                Some(comment),
                CommentForm::default(),
                FormErrors::default(),
            )
            .await
        }
        Err(errors) => render_detail(&state, post, None, form, errors).await,
    }
}

async fn find_post(state: &AppState, path: &PostDatePath) -> Result<Post, AppError> {
    let date = path.date().ok_or_else(|| {
        AppError::not_found(
            "Post not found",
            json!({ "year": path.year, "month": path.month, "day": path.day }),
        )
    })?;

    state.post_service.get_published_post(date, &path.slug).await
}

async fn render_detail(
    state: &AppState,
    post: Post,
    new_comment: Option<Comment>,
    comment_form: CommentForm,
    errors: FormErrors,
) -> Result<PostDetailTemplate, AppError> {
    let comments = state.comment_service.active_comments(&post).await?;
    let similar_posts = state.post_service.similar_posts(&post).await?;

    Ok(PostDetailTemplate {
        post,
        comments,
        new_comment,
        comment_form,
        errors,
        similar_posts,
    })
}
