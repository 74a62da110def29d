//! "Share this post by email" page.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::{Path, State};
use serde_json::json;

use crate::domain::entities::Post;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::forms::{FormErrors, ShareForm, clean};

/// Template for the share page.
#[derive(Template, WebTemplate)]
#[template(path = "blog/post/share.html")]
pub struct PostShareTemplate {
    pub post: Post,
    pub form: ShareForm,
    pub errors: FormErrors,
    /// Set once the email has been handed to the mailer.
    pub sent: bool,
}

/// Renders the empty share form.
///
/// # Endpoint
///
/// `GET /blog/{post_id}/share`
///
/// # Errors
///
/// Responds `404 Not Found` unless `post_id` names a published post.
pub async fn post_share_form_handler(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<PostShareTemplate, AppError> {
    let post = find_post(&state, &post_id).await?;

    Ok(PostShareTemplate {
        post,
        form: ShareForm::default(),
        errors: FormErrors::default(),
        sent: false,
    })
}

/// Validates the share form and sends one recommendation email.
///
/// # Endpoint
///
/// `POST /blog/{post_id}/share`
///
/// # Errors
///
/// Responds `404 Not Found` unless `post_id` names a published post, and
/// `500` if the email cannot be sent.
pub async fn post_share_handler(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
    Form(form): Form<ShareForm>,
) -> Result<PostShareTemplate, AppError> {
    let post = find_post(&state, &post_id).await?;

    match clean(&form, ShareForm::trimmed) {
        Ok(cleaned) => {
            state
                .share_service
                .recommend_post(&post, cleaned.clone().into())
                .await?;

            Ok(PostShareTemplate {
                post,
                form: cleaned,
                errors: FormErrors::default(),
                sent: true,
            })
        }
        Err(errors) => Ok(PostShareTemplate {
            post,
            form,
            errors,
            sent: false,
        }),
    }
}

async fn find_post(state: &AppState, post_id: &str) -> Result<Post, AppError> {
    let id: i64 = post_id
        .parse()
        .map_err(|_| AppError::not_found("Post not found", json!({ "id": post_id })))?;

    state.post_service.get_published_post_by_id(id).await
}
